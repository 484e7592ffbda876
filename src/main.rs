use anyhow::Result;
use camshot::capture::NokhwaProvider;
use camshot::pipeline::{self, CaptureRequest};
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Long flags that may also be written with a single dash, e.g. `-list`
const LONG_FLAGS: &[&str] = &["output", "list", "device", "grayscale", "debug"];

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output image path (.png, .jpg, .jpeg)
    #[arg(short, long, default_value = "screenshot.png", allow_hyphen_values = true)]
    output: PathBuf,

    /// List available cameras and exit
    #[arg(long)]
    list: bool,

    /// Camera device index
    #[arg(long, default_value_t = 0)]
    device: u32,

    /// Save a single-channel grayscale image
    #[arg(long)]
    grayscale: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

/// Rewrite `-list` style flags to `--list` so clap accepts both spellings.
///
/// The token following `-o`/`--output` is the path and is never rewritten.
fn normalize_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut normalized = Vec::new();
    let mut iter = args.into_iter();

    while let Some(arg) = iter.next() {
        let Some(text) = arg.to_str() else {
            normalized.push(arg);
            continue;
        };

        if text == "--" {
            normalized.push(arg);
            normalized.extend(iter);
            break;
        }

        let rewritten = match text.strip_prefix('-') {
            Some(rest) if !rest.starts_with('-') => {
                let name = rest.split('=').next().unwrap_or(rest);
                LONG_FLAGS.contains(&name).then(|| format!("-{}", text))
            }
            _ => None,
        };
        let flag = rewritten.as_deref().unwrap_or(text);
        let takes_value = flag == "-o" || flag == "--output";

        normalized.push(rewritten.map(OsString::from).unwrap_or(arg));

        if takes_value {
            if let Some(value) = iter.next() {
                normalized.push(value);
            }
        }
    }

    normalized
}

fn main() -> Result<()> {
    let args = Args::parse_from(normalize_flags(std::env::args_os()));

    // Initialize logging
    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let provider = NokhwaProvider::new();
    let mut stdout = std::io::stdout().lock();

    if args.list {
        let count = pipeline::list_cameras(&provider, &mut stdout)?;
        tracing::debug!("Listed {} camera(s)", count);
        return Ok(());
    }

    let request = CaptureRequest {
        output: args.output,
        device_index: args.device,
        grayscale: args.grayscale,
    };

    pipeline::capture_to_file(&provider, &request, &mut stdout)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::parse_from(normalize_flags(argv.iter().map(OsString::from)))
    }

    #[test]
    fn defaults_to_screenshot_png() {
        let args = parse(&["camshot"]);
        assert_eq!(args.output, PathBuf::from("screenshot.png"));
        assert!(!args.list);
        assert_eq!(args.device, 0);
    }

    #[test]
    fn single_dash_long_flags_are_accepted() {
        let args = parse(&["camshot", "-list", "-device=2", "-grayscale"]);
        assert!(args.list);
        assert_eq!(args.device, 2);
        assert!(args.grayscale);
    }

    #[test]
    fn double_dash_and_short_output_still_work() {
        let args = parse(&["camshot", "--list", "-o", "shot.jpg"]);
        assert!(args.list);
        assert_eq!(args.output, PathBuf::from("shot.jpg"));
    }

    #[test]
    fn output_value_is_never_rewritten() {
        let args = parse(&["camshot", "-o", "-list"]);
        assert!(!args.list);
        assert_eq!(args.output, PathBuf::from("-list"));

        let args = parse(&["camshot", "-output", "-grayscale", "-list"]);
        assert!(args.list);
        assert!(!args.grayscale);
        assert_eq!(args.output, PathBuf::from("-grayscale"));
    }

    #[test]
    fn only_known_long_flags_are_rewritten() {
        let normalized = normalize_flags(
            ["camshot", "-list.png", "-o=a.png", "-output=b.png", "--", "-list"]
                .iter()
                .map(OsString::from),
        );
        assert_eq!(
            normalized,
            ["camshot", "-list.png", "-o=a.png", "--output=b.png", "--", "-list"]
                .iter()
                .map(OsString::from)
                .collect::<Vec<_>>()
        );
    }
}
