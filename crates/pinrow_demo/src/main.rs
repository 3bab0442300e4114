//! # PINROW Keypad Demo
//!
//! Headless stand-in for the keypad screen: every key press goes to the
//! password row, frames are ticked at 60 fps until the row settles, and the
//! draw commands of the last frame are printed.
//!
//! ## Usage
//!
//! ```bash
//! pinrow_demo --password 1234 1 2 3 5
//! pinrow_demo --config row.toml 1 2 d 2 3 4
//! RUST_LOG=pinrow_ui=trace pinrow_demo 1 2 3 4
//! ```

use std::process::ExitCode;

use pinrow_ui::{
    ActionListener, CommandRecorder, PasswordRow, RenderCommand, RowConfig, RowResult, Widget,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// One 60 fps frame.
const FRAME_MS: f32 = 1000.0 / 60.0;

/// Upper bound on frames spent settling after one key.
const MAX_SETTLE_FRAMES: u32 = 600;

const DEFAULT_PASSWORD: &str = "1234";

/// Parsed command line.
#[derive(Debug)]
struct Options {
    config_path: Option<String>,
    password: String,
    keys: Vec<Key>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    Digit(char),
    Delete,
}

/// Judges completed input against the password and resets the row once the
/// judgement animation is over.
struct KeypadHost {
    password: String,
}

impl ActionListener for KeypadHost {
    fn on_complete_input(&mut self, input: &str, row: &mut PasswordRow) {
        if input == self.password {
            info!("password accepted");
            row.correct_animation();
        } else {
            info!("password rejected");
            row.incorrect_animation();
        }
    }

    fn on_end_judge_animation(&mut self, row: &mut PasswordRow) {
        info!("judgement shown, resetting");
        row.reset();
    }
}

fn main() -> ExitCode {
    init_tracing();

    let options = match parse_args(std::env::args().skip(1)) {
        Ok(Some(options)) => options,
        Ok(None) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("error: {message}");
            print_usage();
            return ExitCode::from(2);
        }
    };

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let default_level = "info";
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn print_usage() {
    println!("Usage: pinrow_demo [OPTIONS] <KEYS>...");
    println!();
    println!("Keys:");
    println!("  0-9                        Append a digit");
    println!("  d                          Delete the last digit");
    println!();
    println!("Options:");
    println!("  -c, --config <FILE>        Row configuration (TOML)");
    println!("  -p, --password <DIGITS>    Expected password (default: {DEFAULT_PASSWORD})");
    println!("  -h, --help                 Show this help");
}

/// Returns `Ok(None)` when help was requested.
fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Option<Options>, String> {
    let mut options = Options {
        config_path: None,
        password: DEFAULT_PASSWORD.to_owned(),
        keys: Vec::new(),
    };

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                options.config_path = Some(args.next().ok_or("--config needs a file path")?);
            }
            "--password" | "-p" => {
                options.password = args.next().ok_or("--password needs a value")?;
            }
            "--help" | "-h" => return Ok(None),
            keys => {
                // "12d3" and "1 2 d 3" are the same key sequence.
                for c in keys.chars() {
                    match c {
                        '0'..='9' => options.keys.push(Key::Digit(c)),
                        'd' | 'D' => options.keys.push(Key::Delete),
                        other => return Err(format!("unknown key '{other}'")),
                    }
                }
            }
        }
    }

    Ok(Some(options))
}

fn run(options: &Options) -> RowResult<()> {
    let config = match &options.config_path {
        Some(path) => RowConfig::load(path)?,
        None => RowConfig::default(),
    };
    info!(
        password_count = config.password_count,
        keys = options.keys.len(),
        "starting keypad demo"
    );

    let mut row = PasswordRow::new(config)?;
    row.set_listener(Box::new(KeypadHost {
        password: options.password.clone(),
    }));

    let mut recorder = CommandRecorder::new();
    let mut frames = 0u32;
    for &key in &options.keys {
        match key {
            Key::Digit(digit) => row.append_input_text(digit.encode_utf8(&mut [0; 4])),
            Key::Delete => row.remove_input_text(),
        }
        info!(?key, input = row.input(), "key pressed");
        frames += settle(&mut row, &mut recorder);
    }

    // Always show at least one frame, even with no keys.
    if frames == 0 {
        recorder.begin_frame();
        row.draw(&mut recorder);
    }

    let (width, height) = row.preferred_size();
    println!("frames: {frames}");
    println!("input: \"{}\"", row.input());
    println!("size: {width} x {height}");
    for command in recorder.commands() {
        let RenderCommand::Circle { cx, cy, radius, paint } = command;
        println!(
            "circle cx={cx:.1} cy={cy:.1} r={radius:.2} {:?} {} stroke={:.1}",
            paint.style, paint.color, paint.stroke_width
        );
    }
    Ok(())
}

/// Ticks frames until the row is idle, redrawing whenever it changed.
fn settle(row: &mut PasswordRow, recorder: &mut CommandRecorder) -> u32 {
    let mut frames = 0;
    while !row.is_idle() {
        if frames == MAX_SETTLE_FRAMES {
            warn!(frames, "row did not settle");
            break;
        }
        row.update(FRAME_MS);
        frames += 1;
        if row.take_redraw() {
            recorder.begin_frame();
            row.draw(recorder);
        }
    }
    frames
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_parse_keys_and_options() {
        let options = parse_args(args(&["-p", "42", "1", "2d", "3"])).unwrap().unwrap();
        assert_eq!(options.password, "42");
        assert_eq!(options.config_path, None);
        assert_eq!(
            options.keys,
            vec![Key::Digit('1'), Key::Digit('2'), Key::Delete, Key::Digit('3')]
        );
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        assert!(parse_args(args(&["1", "x"])).is_err());
        assert!(parse_args(args(&["--config"])).is_err());
        assert!(parse_args(args(&["-h"])).unwrap().is_none());
    }

    #[test]
    fn test_wrong_password_resets_row() {
        let options = parse_args(args(&["5", "6", "7", "8"])).unwrap().unwrap();
        assert!(run(&options).is_ok());
    }

    #[test]
    fn test_settle_reaches_reset_after_judgement() {
        let mut row = PasswordRow::new(RowConfig::default()).unwrap();
        row.set_listener(Box::new(KeypadHost {
            password: "1234".to_owned(),
        }));
        let mut recorder = CommandRecorder::new();
        row.append_input_text("1234");
        let frames = settle(&mut row, &mut recorder);
        assert!(frames > 0 && frames < MAX_SETTLE_FRAMES);
        assert_eq!(row.input(), "");
        assert_eq!(recorder.command_count(), 12);
    }
}
