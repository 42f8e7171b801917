//! # User Prompt Trait
//!
//! 対話的な入力（メニュー、整数、yes/no）を抽象化
//!
//! 不正な入力は実装側で再入力させる。エラーになるのは入力が取得できない場合のみ。

use crate::domain::errors::PromptError;

/// 整数入力の制約
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegerPrompt {
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub default: Option<i64>,
}

impl IntegerPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: i64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn default_value(mut self, default: i64) -> Self {
        self.default = Some(default);
        self
    }
}

/// ユーザー入力
pub trait UserPrompt: Send + Sync {
    /// 整数を読み込む（空入力なら既定値）
    fn read_integer(&self, prompt: IntegerPrompt) -> Result<i64, PromptError>;

    /// yes/no を読み込む（空入力なら既定値）
    fn read_bool(&self, default: Option<bool>) -> Result<bool, PromptError>;

    /// メニューから選択させ、選ばれた項目のインデックスを返す
    fn select_from_menu(
        &self,
        options: &[String],
        default: Option<usize>,
    ) -> Result<usize, PromptError>;

    /// 1行の文字列を読み込む
    fn read_text(&self) -> Result<String, PromptError>;
}
