//! # SessionState Entity
//!
//! 選択中の日付とセッション番号、記録済みエントリを保持する

use std::path::PathBuf;

use super::entry::{Entry, Exercise};

/// 選択中のトレーニング日
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDay {
    pub num: u32,
    pub date: String,
}

/// 記録中のセッション状態
///
/// 日付とセッション番号は常にペアで設定・解除される
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    day: Option<SessionDay>,
    entries: Vec<Entry>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 日付が設定されているか
    pub fn has_day(&self) -> bool {
        self.day.is_some()
    }

    pub fn day(&self) -> Option<&SessionDay> {
        self.day.as_ref()
    }

    pub fn set_day(&mut self, num: u32, date: impl Into<String>) {
        self.day = Some(SessionDay {
            num,
            date: date.into(),
        });
    }

    pub fn clear_day(&mut self) {
        self.day = None;
    }

    /// エントリを追加（重複チェックは呼び出し側の責任）
    pub fn add_entry(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }

    /// 記録済みの種目（初出順、重複なし）
    pub fn exercises_logged(&self) -> Vec<Exercise> {
        let mut exercises = Vec::new();
        for entry in &self.entries {
            if !exercises.contains(&entry.exercise()) {
                exercises.push(entry.exercise());
            }
        }
        exercises
    }

    /// 記録済みの動画ファイル（初出順、重複なし）
    pub fn videos_claimed(&self) -> Vec<PathBuf> {
        let mut videos: Vec<PathBuf> = Vec::new();
        for entry in &self.entries {
            if !videos.iter().any(|v| v == entry.video_file()) {
                videos.push(entry.video_file().to_path_buf());
            }
        }
        videos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::entry::SetIndex;

    fn entry(video: &str, exercise: &str, set: u32) -> Entry {
        Entry::new(
            video,
            exercise,
            SetIndex::Number(set),
            Some(5),
            Some(100),
            1,
            "2024-01-01",
        )
        .unwrap()
    }

    #[test]
    fn test_new_state_has_no_day() {
        let state = SessionState::new();
        assert!(!state.has_day());
        assert!(state.entries().is_empty());
        assert!(state.exercises_logged().is_empty());
        assert!(state.videos_claimed().is_empty());
    }

    #[test]
    fn test_set_and_clear_day() {
        let mut state = SessionState::new();
        state.set_day(3, "2024-01-01");
        assert!(state.has_day());
        assert_eq!(
            state.day(),
            Some(&SessionDay {
                num: 3,
                date: "2024-01-01".to_string()
            })
        );

        state.clear_day();
        assert!(!state.has_day());
        assert!(state.day().is_none());
    }

    #[test]
    fn test_day_reset_keeps_entries() {
        let mut state = SessionState::new();
        state.set_day(1, "2024-01-01");
        state.add_entry(entry("/a.mp4", "squat", 1));
        state.clear_day();
        assert_eq!(state.entries().len(), 1);
    }

    #[test]
    fn test_exercises_logged_first_occurrence_order() {
        let mut state = SessionState::new();
        state.add_entry(entry("/a.mp4", "deadlift", 1));
        state.add_entry(entry("/b.mp4", "squat", 1));
        state.add_entry(entry("/c.mp4", "deadlift", 2));

        assert_eq!(
            state.exercises_logged(),
            vec![Exercise::Deadlift, Exercise::Squat]
        );
    }

    #[test]
    fn test_videos_claimed_distinct() {
        let mut state = SessionState::new();
        state.add_entry(entry("/b.mp4", "squat", 1));
        state.add_entry(entry("/a.mp4", "squat", 2));
        // 同じ動画を重複登録しても、呼び出し側の責任なので追加はされる
        state.add_entry(entry("/b.mp4", "squat", 3));

        assert_eq!(state.entries().len(), 3);
        assert_eq!(
            state.videos_claimed(),
            vec![PathBuf::from("/b.mp4"), PathBuf::from("/a.mp4")]
        );
    }
}
