use std::fs::File;
use std::io::{self, BufReader, IsTerminal, Write};
use std::ops::Range;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use itertools::Itertools;
use log::{debug, info};
use ropey::Rope;

use seqmatch::{
    Assertion, BoxedPattern, CharClass, Found, Greediness, HomogeneousConcatenation, Literal,
    Multiplicity, Repetition, find_iter, find_iter_backward,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Literal text to search for
    #[arg(value_name = "NEEDLE", required_unless_present = "class", conflicts_with = "class")]
    needle: Option<String>,

    /// Search for a named character class instead of a literal
    #[arg(short = 'k', long, value_name = "NAME")]
    class: Option<String>,

    /// Repeat the needle MIN times, MIN or more (`MIN,`) or MIN to MAX
    #[arg(short, long, value_name = "MIN[,MAX]", default_value = "1", value_parser = parse_multiplicity)]
    repeat: Multiplicity,

    /// Prefer the fewest repetitions
    #[arg(short, long)]
    lazy: bool,

    /// Only match right after this text
    #[arg(long, value_name = "TEXT")]
    after: Option<String>,

    /// Never match right after this text
    #[arg(long, value_name = "TEXT")]
    not_after: Option<String>,

    /// Only match right before this text
    #[arg(long, value_name = "TEXT")]
    before: Option<String>,

    /// Never match right before this text
    #[arg(long, value_name = "TEXT")]
    not_before: Option<String>,

    /// Scan from the end of the input towards the start
    #[arg(short, long)]
    backward: bool,

    /// Print only the number of matches
    #[arg(short, long)]
    count: bool,

    /// When to highlight matches
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Input file, stdin if absent
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn enabled(self) -> bool {
        match self {
            ColorChoice::Auto => io::stdout().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

fn parse_multiplicity(text: &str) -> Result<Multiplicity> {
    let parse = |n: &str| {
        n.trim()
            .parse::<usize>()
            .with_context(|| format!("invalid repeat count {n:?}"))
    };
    match text.split_once(',') {
        None => Ok(Multiplicity::exactly(parse(text)?)),
        Some((min, max)) if max.trim().is_empty() => Ok(Multiplicity::at_least(parse(min)?)),
        Some((min, max)) => Ok(Multiplicity::new(parse(min)?, Some(parse(max)?))?),
    }
}

fn build_pattern(args: &Args) -> Result<BoxedPattern<'static, Rope>> {
    let element: BoxedPattern<'static, Rope> = match (&args.class, &args.needle) {
        (Some(name), _) => Box::new(CharClass::named(name)?),
        (None, Some(needle)) => Box::new(Literal::from_str(needle)),
        (None, None) => bail!("either a needle or --class is required"),
    };
    let greediness = if args.lazy {
        Greediness::Lazy
    } else {
        Greediness::Eager
    };

    let mut parts: Vec<BoxedPattern<'static, Rope>> = Vec::new();
    if let Some(text) = &args.after {
        parts.push(Box::new(Assertion::lookbehind(Literal::from_str(text))));
    }
    if let Some(text) = &args.not_after {
        parts.push(Box::new(Assertion::negative_lookbehind(Literal::from_str(text))));
    }
    parts.push(Box::new(Repetition::new(element, args.repeat, greediness)));
    if let Some(text) = &args.before {
        parts.push(Box::new(Assertion::lookahead(Literal::from_str(text))));
    }
    if let Some(text) = &args.not_before {
        parts.push(Box::new(Assertion::negative_lookahead(Literal::from_str(text))));
    }

    debug!("pattern has {} part(s), repeat {}", parts.len(), args.repeat);
    Ok(match parts.len() {
        1 => parts.remove(0),
        _ => Box::new(HomogeneousConcatenation::new(parts)?),
    })
}

fn read_input(file: Option<&PathBuf>) -> Result<Rope> {
    match file {
        Some(path) => {
            let reader = File::open(path)
                .map(BufReader::new)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Rope::from_reader(reader).with_context(|| format!("failed to read {}", path.display()))
        }
        None => Rope::from_reader(io::stdin().lock()).context("failed to read stdin"),
    }
}

/// Writes one input line with `spans` (char ranges into the rope) highlighted.
fn write_line(
    out: &mut impl Write,
    rope: &Rope,
    line_idx: usize,
    spans: &[Range<usize>],
    color: bool,
) -> io::Result<()> {
    let line_start = rope.line_to_char(line_idx);
    let chars = rope
        .line(line_idx)
        .chars()
        .take_while(|&c| c != '\n' && c != '\r')
        .collect_vec();
    let clip = |pos: usize| pos.saturating_sub(line_start).min(chars.len());

    if color {
        queue!(
            out,
            SetForegroundColor(Color::DarkGrey),
            Print(format!("{}:", line_idx + 1)),
            ResetColor
        )?;
    } else {
        queue!(out, Print(format!("{}:", line_idx + 1)))?;
    }

    let mut at = 0;
    for span in spans.iter().map(|s| clip(s.start)..clip(s.end)).sorted_by_key(|s| s.start) {
        if span.start < at || span.is_empty() {
            continue;
        }
        let plain: String = chars[at..span.start].iter().collect();
        let matched: String = chars[span.clone()].iter().collect();
        queue!(out, Print(plain))?;
        if color {
            queue!(
                out,
                SetForegroundColor(Color::Red),
                SetAttribute(Attribute::Bold),
                Print(matched),
                SetAttribute(Attribute::Reset),
                ResetColor
            )?;
        } else {
            queue!(out, Print(matched))?;
        }
        at = span.end;
    }
    let rest: String = chars[at..].iter().collect();
    queue!(out, Print(rest), Print("\n"))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let pattern = build_pattern(&args)?;
    let rope = read_input(args.file.as_ref())?;
    info!("searching {} chars in {} lines", rope.len_chars(), rope.len_lines());

    let found: Vec<Found<'_, Rope>> = if args.backward {
        find_iter_backward(&pattern, &rope).collect()
    } else {
        find_iter(&pattern, &rope).collect()
    };
    info!("{} match(es)", found.len());

    let mut out = io::stdout().lock();
    if args.count {
        writeln!(out, "{}", found.len())?;
        return Ok(());
    }

    let color = args.color.enabled();
    for (line_idx, group) in &found.iter().chunk_by(|f| rope.char_to_line(f.start)) {
        let spans = group.map(Found::span).collect_vec();
        write_line(&mut out, &rope, line_idx, &spans, color)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        Args::parse_from(std::iter::once("seqmatch").chain(extra.iter().copied()))
    }

    fn render(args: &Args, text: &str) -> String {
        let pattern = build_pattern(args).unwrap();
        let rope = Rope::from_str(text);
        let found = find_iter(&pattern, &rope).collect_vec();
        let mut out = Vec::new();
        for (line_idx, group) in &found.iter().chunk_by(|f| rope.char_to_line(f.start)) {
            let spans = group.map(Found::span).collect_vec();
            write_line(&mut out, &rope, line_idx, &spans, false).unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn repeat_counts_parse() {
        assert_eq!(parse_multiplicity("3").unwrap(), Multiplicity::exactly(3));
        assert_eq!(parse_multiplicity("2,").unwrap(), Multiplicity::at_least(2));
        assert_eq!(
            parse_multiplicity("1,4").unwrap(),
            Multiplicity::new(1, Some(4)).unwrap()
        );
        assert!(parse_multiplicity("4,1").is_err());
        assert!(parse_multiplicity("x").is_err());
    }

    #[test]
    fn prints_matching_lines_with_numbers() {
        let output = render(&args(&["ab"]), "xx\nabab\ncab\n");
        assert_eq!(output, "2:abab\n3:cab\n");
    }

    #[test]
    fn class_and_gates_narrow_the_matches() {
        let a = args(&["--class", "digit", "--repeat", "1,", "--after", "$"]);
        let pattern = build_pattern(&a).unwrap();
        let rope = Rope::from_str("5 $12\n$3");
        let spans = find_iter(&pattern, &rope).map(|f| f.span()).collect_vec();
        assert_eq!(spans, vec![3..5, 7..8]);
    }

    #[test]
    fn unknown_class_is_an_error() {
        assert!(build_pattern(&args(&["--class", "vowel"])).is_err());
    }

    #[test]
    fn needle_or_class_is_required() {
        assert!(Args::try_parse_from(["seqmatch"]).is_err());
    }
}
