//! Tests for Runner and Session
//!
//! These tests verify:
//! - Persistent mode: one decimal line per command, then the farewell
//! - Failed commands do not stop the loop
//! - Line endings and invalid UTF-8 input
//! - Output flushing and broken output pipes
//! - Single-invocation argument joining

use std::fs::{self, File};
use std::io::{self, BufReader, Cursor, Write};
use std::path::PathBuf;

use ev3native::config::Config;
use ev3native::dispatch::Dispatcher;
use ev3native::runner::{Runner, SessionStats};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_table() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("file.bin");
    let mut file = File::create(&path).unwrap();
    file.write_all(&[10, 20, 30, 40, 50, 60]).unwrap();
    (temp_dir, path)
}

fn runner_default() -> Runner {
    Runner::new(Config::default())
}

fn serve(runner: &Runner, input: &[u8]) -> (String, SessionStats) {
    let mut output = Vec::new();
    let stats = runner.serve(Cursor::new(input), &mut output).unwrap();
    (String::from_utf8(output).unwrap(), stats)
}

/// Writer that counts flushes and can refuse writes like a closed pipe
#[derive(Default)]
struct PipeWriter {
    data: Vec<u8>,
    flushes: usize,
    closed: bool,
}

impl Write for PipeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.closed {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
        }
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

// =============================================================================
// Persistent Mode Tests
// =============================================================================

#[test]
fn test_serve_answers_then_says_farewell() {
    let (_temp, path) = setup_table();
    let runner = Runner::new(Config::default());

    let input = format!("tablelookup {} 2 0 0\nbogus command\n", path.display());
    let (output, stats) = serve(&runner, input.as_bytes());

    assert_eq!(output, "10\n255\nEnding native code process...\n");
    assert_eq!(stats, SessionStats { commands_processed: 2, failures: 1 });
}

#[test]
fn test_serve_example_scenarios() {
    let (_temp, path) = setup_table();
    let runner = Runner::new(Config::default());
    let p = path.display();

    let input = format!(
        "tablelookup {p} 2 1 0\ntablelookup {p} 2 2 1\ntablelookup {p} 2 3 0\n",
        p = p
    );
    let (output, _) = serve(&runner, input.as_bytes());

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines, vec!["30", "60", "255", "Ending native code process..."]);
}

#[test]
fn test_serve_empty_input_only_says_farewell() {
    let runner = Runner::new(Config::default());
    let (output, stats) = serve(&runner, b"");

    assert_eq!(output, "Ending native code process...\n");
    assert_eq!(stats, SessionStats::default());
}

#[test]
fn test_serve_failure_does_not_stop_loop() {
    let (_temp, path) = setup_table();
    let runner = Runner::new(Config::default());

    let input = format!(
        "tablelookup /missing 1 0 0\n\ntablelookup {} 1 0 5\n",
        path.display()
    );
    let (output, stats) = serve(&runner, input.as_bytes());

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[..3], ["255", "255", "60"]);
    assert_eq!(stats.commands_processed, 3);
    assert_eq!(stats.failures, 2);
}

#[test]
fn test_serve_last_line_without_newline() {
    let (_temp, path) = setup_table();
    let runner = Runner::new(Config::default());

    let input = format!("tablelookup {} 1 0 1", path.display());
    let (output, _) = serve(&runner, input.as_bytes());

    assert_eq!(output, "20\nEnding native code process...\n");
}

#[test]
fn test_serve_crlf_line_endings() {
    let (_temp, path) = setup_table();
    let runner = Runner::new(Config::default());

    let input = format!("tablelookup {} 1 0 2\r\n", path.display());
    let (output, _) = serve(&runner, input.as_bytes());

    assert_eq!(output.lines().next(), Some("30"));
}

#[test]
fn test_serve_invalid_utf8_command_answers_255() {
    let runner = Runner::new(Config::default());
    let (output, stats) = serve(&runner, b"\xff\xfe garbage\n");

    assert_eq!(output.lines().next(), Some("255"));
    assert_eq!(stats.commands_processed, 1);
}

#[cfg(unix)]
#[test]
fn test_serve_non_utf8_file_name() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(OsStr::from_bytes(b"t\xff.bin"));
    fs::write(&path, [42u8, 43]).unwrap();

    let mut input = b"tablelookup ".to_vec();
    input.extend_from_slice(path.as_os_str().as_bytes());
    input.extend_from_slice(b" 1 0 0\n");
    let (output, stats) = serve(&runner_default(), &input);

    assert_eq!(output, "42\nEnding native code process...\n");
    assert_eq!(stats.failures, 0);
}

#[test]
fn test_serve_custom_farewell() {
    let config = Config::builder().farewell("bye").build().unwrap();
    let runner = Runner::new(config);

    let (output, _) = serve(&runner, b"nothing\n");
    assert_eq!(output, "255\nbye\n");
}

#[test]
fn test_serve_with_buffered_reader() {
    let (_temp, path) = setup_table();
    let runner = Runner::new(Config::default());

    let input = format!("tablelookup {} 3 1 1\n", path.display());
    let reader = BufReader::with_capacity(4, input.as_bytes());
    let mut output = Vec::new();
    runner.serve(reader, &mut output).unwrap();

    assert!(String::from_utf8(output).unwrap().starts_with("50\n"));
}

#[test]
fn test_serve_flushes_every_response() {
    let runner = Runner::new(Config::default());
    let mut writer = PipeWriter::default();

    runner.serve(Cursor::new(b"a\nb\nc\n".to_vec()), &mut writer).unwrap();

    // One flush per response plus one for the farewell
    assert_eq!(writer.flushes, 4);
    assert_eq!(
        String::from_utf8(writer.data).unwrap(),
        "255\n255\n255\nEnding native code process...\n"
    );
}

#[test]
fn test_serve_broken_pipe_ends_quietly() {
    let runner = Runner::new(Config::default());
    let mut writer = PipeWriter {
        closed: true,
        ..PipeWriter::default()
    };

    let stats = runner
        .serve(Cursor::new(b"a\nb\n".to_vec()), &mut writer)
        .unwrap();

    assert_eq!(stats.commands_processed, 1);
    assert!(writer.data.is_empty());
}

// =============================================================================
// Single Invocation Tests
// =============================================================================

#[test]
fn test_run_once_joins_arguments() {
    let (_temp, path) = setup_table();
    let runner = Runner::new(Config::default());
    let p = path.display().to_string();

    let code = runner.run_once(["tablelookup", p.as_str(), "2", "2", "1"]);
    assert_eq!(code.value(), 60);
}

#[test]
fn test_run_once_single_joined_argument() {
    let (_temp, path) = setup_table();
    let runner = Runner::new(Config::default());

    let command = format!("tablelookup {} 2 1 0", path.display());
    assert_eq!(runner.run_once([command]).value(), 30);
}

#[cfg(unix)]
#[test]
fn test_run_once_non_utf8_argument() {
    use std::ffi::{OsStr, OsString};
    use std::os::unix::ffi::OsStrExt;

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(OsStr::from_bytes(b"row\xfe.bin"));
    fs::write(&path, [1u8, 2, 3, 4]).unwrap();

    let args: Vec<OsString> = vec![
        "tablelookup".into(),
        path.into_os_string(),
        "2".into(),
        "1".into(),
        "1".into(),
    ];
    assert_eq!(runner_default().run_once(&args).value(), 4);
}

#[test]
fn test_run_once_failures() {
    let runner = Runner::new(Config::default());

    assert!(runner.run_once(["bogus"]).is_failure());
    assert!(runner.run_once(Vec::<String>::new()).is_failure());
    assert!(runner.run_once(["tablelookup", "/missing", "1", "0", "0"]).is_failure());
}

#[test]
fn test_runner_with_custom_dispatcher() {
    let runner = Runner::with_dispatcher(Config::default(), Dispatcher::new());

    assert_eq!(runner.dispatcher().keywords().count(), 0);
    assert!(runner.run_once(["tablelookup", "f", "1", "0", "0"]).is_failure());
}
