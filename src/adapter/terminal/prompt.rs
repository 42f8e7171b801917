//! Terminal Prompt Implementation
//!
//! UserPromptの端末（標準入出力）実装

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};
use std::sync::Mutex;
use tokio::runtime::{Handle, RuntimeFlavor};

use crate::domain::errors::{InputError, PromptError};
use crate::domain::repositories::user_prompt::{IntegerPrompt, UserPrompt};

/// 整数入力をパースして範囲を検証する
pub fn parse_integer(input: &str, bounds: IntegerPrompt) -> Result<i64, InputError> {
    let value = match (input.is_empty(), bounds.default) {
        (true, Some(default)) => default,
        _ => input
            .parse::<i64>()
            .map_err(|_| InputError::NotAnInteger(input.to_string()))?,
    };

    if let Some(min) = bounds.min {
        if value < min {
            return Err(InputError::TooSmall(min));
        }
    }
    if let Some(max) = bounds.max {
        if value > max {
            return Err(InputError::TooLarge(max));
        }
    }
    Ok(value)
}

/// yes/no 入力をパースする（大文字小文字は区別しない）
pub fn parse_bool(input: &str, default: Option<bool>) -> Result<bool, InputError> {
    if input.is_empty() {
        return default.ok_or(InputError::NotABoolean);
    }
    match input.to_ascii_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        _ => Err(InputError::NotABoolean),
    }
}

/// ブロッキングする読み込みを実行する
///
/// マルチスレッドランタイム上では `block_in_place` でワーカーを明け渡す。
/// current-thread ランタイムやランタイム外ではそのまま実行する。
fn run_blocking<T>(f: impl FnOnce() -> T) -> T {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(f)
        }
        _ => f(),
    }
}

/// 端末プロンプト
///
/// 不正な入力はメッセージを表示して再入力させる
pub struct TerminalPrompt<R, W> {
    input: Mutex<R>,
    output: Mutex<W>,
}

impl TerminalPrompt<BufReader<Stdin>, Stdout> {
    /// 標準入出力を使うプロンプト
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead + Send, W: Write + Send> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: Mutex::new(input),
            output: Mutex::new(output),
        }
    }

    fn read_line(&self) -> Result<String, PromptError> {
        let mut line = String::new();
        let read = run_blocking(|| -> io::Result<usize> {
            self.input
                .lock()
                .map_err(|_| io::Error::other("terminal input lock poisoned"))?
                .read_line(&mut line)
        })?;
        if read == 0 {
            return Err(PromptError::Closed);
        }
        Ok(line.trim().to_string())
    }

    fn write_line(&self, message: &str) -> Result<(), PromptError> {
        let mut output = self
            .output
            .lock()
            .map_err(|_| io::Error::other("terminal output lock poisoned"))?;
        writeln!(output, "{}", message)?;
        output.flush()?;
        Ok(())
    }

    /// パースに成功するまで読み込みを繰り返す
    fn read_until_valid<T>(
        &self,
        before_each: impl Fn() -> Result<(), PromptError>,
        parse: impl Fn(&str) -> Result<T, InputError>,
    ) -> Result<T, PromptError> {
        loop {
            before_each()?;
            let line = self.read_line()?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(e) => self.write_line(&format!("Invalid input: {}", e))?,
            }
        }
    }
}

impl<R: BufRead + Send, W: Write + Send> UserPrompt for TerminalPrompt<R, W> {
    fn read_integer(&self, prompt: IntegerPrompt) -> Result<i64, PromptError> {
        self.read_until_valid(|| Ok(()), |line| parse_integer(line, prompt))
    }

    fn read_bool(&self, default: Option<bool>) -> Result<bool, PromptError> {
        self.read_until_valid(|| Ok(()), |line| parse_bool(line, default))
    }

    fn select_from_menu(
        &self,
        options: &[String],
        default: Option<usize>,
    ) -> Result<usize, PromptError> {
        if options.is_empty() {
            return Err(PromptError::EmptyMenu);
        }

        let mut bounds = IntegerPrompt::new().min(0).max(options.len() as i64 - 1);
        if let Some(default) = default {
            bounds = bounds.default_value(default as i64);
        }

        let choice = self.read_until_valid(
            || {
                for (idx, option) in options.iter().enumerate() {
                    self.write_line(&format!("({}) {}", idx, option))?;
                }
                Ok(())
            },
            |line| parse_integer(line, bounds),
        )?;
        Ok(choice as usize)
    }

    fn read_text(&self) -> Result<String, PromptError> {
        self.read_line()
    }
}
