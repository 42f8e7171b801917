//! # Entry Value Object
//!
//! 1本の動画に対応する1セット（またはウォームアップ）の記録

use chrono::NaiveDate;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::domain::errors::ValidationError;

/// 記録できる種目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Exercise {
    Squat,
    BenchPress,
    OverheadPress,
    NeutralPullUp,
    Deadlift,
}

impl Exercise {
    /// 全種目（メニュー表示順）
    pub const ALL: [Exercise; 5] = [
        Exercise::Squat,
        Exercise::BenchPress,
        Exercise::OverheadPress,
        Exercise::NeutralPullUp,
        Exercise::Deadlift,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Exercise::Squat => "squat",
            Exercise::BenchPress => "bench press",
            Exercise::OverheadPress => "overhead press",
            Exercise::NeutralPullUp => "neutral pull-up",
            Exercise::Deadlift => "deadlift",
        }
    }

    /// 種目ごとの固定タグ
    pub fn tag(&self) -> &'static str {
        match self {
            Exercise::Squat => "Squat",
            Exercise::BenchPress => "Bench Press",
            Exercise::OverheadPress => "Overhead Press",
            Exercise::NeutralPullUp => "Pull-up",
            Exercise::Deadlift => "Deadlift",
        }
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Exercise {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Exercise::ALL
            .into_iter()
            .find(|e| e.name() == s)
            .ok_or_else(|| ValidationError::InvalidExercise(s.to_string()))
    }
}

/// セット番号（1始まり）またはウォームアップ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetIndex {
    Warmup,
    Number(u32),
}

impl fmt::Display for SetIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetIndex::Warmup => f.write_str("warmup"),
            SetIndex::Number(n) => write!(f, "{}", n),
        }
    }
}

impl FromStr for SetIndex {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "warmup" {
            return Ok(SetIndex::Warmup);
        }
        match s.parse::<u32>() {
            Ok(n) if n > 0 => Ok(SetIndex::Number(n)),
            _ => Err(ValidationError::InvalidSet(s.to_string())),
        }
    }
}

/// 記録エントリ
///
/// 構築に成功した Entry は常に全フィールドが有効
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    video_file: PathBuf,
    exercise: Exercise,
    set: SetIndex,
    reps: Option<u32>,
    weight: Option<u32>,
    day_num: u32,
    day_date: String,
}

impl Entry {
    /// 新しいエントリを作成
    ///
    /// 種目、セット、レップ数、重量、日付の順に検証し、最初の違反でエラーを返す。
    ///
    /// # Errors
    ///
    /// いずれかのフィールドが不正な場合に `ValidationError` を返す
    pub fn new(
        video_file: impl Into<PathBuf>,
        exercise: &str,
        set: SetIndex,
        reps: Option<u32>,
        weight: Option<u32>,
        day_num: u32,
        day_date: &str,
    ) -> Result<Self, ValidationError> {
        let exercise = exercise.parse::<Exercise>()?;

        if set == SetIndex::Number(0) {
            return Err(ValidationError::InvalidSet("0".to_string()));
        }

        match (set, reps) {
            (SetIndex::Warmup, Some(r)) => {
                return Err(ValidationError::InvalidReps(format!("{} (warmup)", r)))
            }
            (SetIndex::Number(_), None) => {
                return Err(ValidationError::InvalidReps("missing".to_string()))
            }
            (SetIndex::Number(_), Some(0)) => {
                return Err(ValidationError::InvalidReps("0".to_string()))
            }
            _ => {}
        }

        match (set, weight) {
            (SetIndex::Warmup, Some(w)) => {
                return Err(ValidationError::InvalidWeight(format!("{} (warmup)", w)))
            }
            (SetIndex::Number(_), None) => {
                return Err(ValidationError::InvalidWeight("missing".to_string()))
            }
            (SetIndex::Number(_), Some(0)) => {
                return Err(ValidationError::InvalidWeight("0".to_string()))
            }
            _ => {}
        }

        if NaiveDate::parse_from_str(day_date, "%Y-%m-%d").is_err() {
            return Err(ValidationError::InvalidDay(format!("\"{}\"", day_date)));
        }

        Ok(Self {
            video_file: video_file.into(),
            exercise,
            set,
            reps,
            weight,
            day_num,
            day_date: day_date.to_string(),
        })
    }

    /// ウォームアップのエントリを作成
    pub fn warmup(
        video_file: impl Into<PathBuf>,
        exercise: Exercise,
        day_num: u32,
        day_date: &str,
    ) -> Result<Self, ValidationError> {
        Self::new(
            video_file,
            exercise.name(),
            SetIndex::Warmup,
            None,
            None,
            day_num,
            day_date,
        )
    }

    pub fn video_file(&self) -> &Path {
        &self.video_file
    }

    pub fn exercise(&self) -> Exercise {
        self.exercise
    }

    pub fn set(&self) -> SetIndex {
        self.set
    }

    pub fn reps(&self) -> Option<u32> {
        self.reps
    }

    pub fn weight(&self) -> Option<u32> {
        self.weight
    }

    pub fn day_num(&self) -> u32 {
        self.day_num
    }

    pub fn day_date(&self) -> &str {
        &self.day_date
    }

    pub fn is_warmup(&self) -> bool {
        self.set == SetIndex::Warmup
    }

    /// 動画に付けるタグ
    pub fn tags(&self) -> Vec<String> {
        let mut tags = vec![self.exercise.tag().to_string()];
        if self.is_warmup() {
            tags.push("Warming Up".to_string());
        }
        tags
    }

    /// 動画タイトルとして使うラベル
    pub fn label(&self) -> String {
        match (self.set, self.reps, self.weight) {
            (SetIndex::Number(n), Some(reps), Some(weight)) => format!(
                "day {} {} set {} {}x{} {}",
                self.day_num, self.exercise, n, reps, weight, self.day_date
            ),
            _ => format!(
                "day {} {} warmup {}",
                self.day_num, self.exercise, self.day_date
            ),
        }
    }

    pub fn file_exists(&self) -> bool {
        self.video_file.is_file()
    }
}
