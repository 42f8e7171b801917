//! # Log Exercise Use Case
//!
//! 種目を1つ選び、ウォームアップと各セットを残りの動画に割り当てる

use anyhow::{Context, Result};
use log::debug;

use crate::domain::entities::entry::{Entry, Exercise, SetIndex};
use crate::domain::entities::remaining_videos::RemainingVideos;
use crate::domain::entities::session_state::SessionState;
use crate::domain::repositories::user_prompt::{IntegerPrompt, UserPrompt};

pub const MAX_WEIGHT: i64 = 600;
pub const DEFAULT_SETS: usize = 4;
pub const DEFAULT_REPS: u32 = 6;

/// まだ記録されていない種目
pub fn unlogged_exercises(state: &SessionState) -> Vec<Exercise> {
    let logged = state.exercises_logged();
    Exercise::ALL
        .into_iter()
        .filter(|e| !logged.contains(e))
        .collect()
}

/// 整数を u32 の範囲で読み込む
fn read_u32<P: UserPrompt + ?Sized>(prompt: &P, mut bounds: IntegerPrompt) -> Result<u32> {
    if bounds.max.is_none() {
        bounds = bounds.max(i64::from(u32::MAX));
    }
    let value = prompt.read_integer(bounds)?;
    u32::try_from(value).with_context(|| format!("Integer {} out of range", value))
}

/// 種目を記録する
///
/// # Arguments
///
/// * `prompt` - ユーザー入力
/// * `state` - セッション状態（日付が設定済みであること）
/// * `remaining` - 未割り当て動画のキュー（割り当てた動画は取り除かれる）
///
/// # Returns
///
/// 追加されたエントリの数
pub fn log_exercise<P: UserPrompt + ?Sized>(
    prompt: &P,
    state: &mut SessionState,
    remaining: &mut RemainingVideos,
) -> Result<usize> {
    let day = state
        .day()
        .cloned()
        .context("A day must be chosen before adding exercises")?;

    if remaining.is_empty() {
        println!("No video files.");
        return Ok(0);
    }
    let choices = unlogged_exercises(state);
    if choices.is_empty() {
        println!("All exercises have already been logged.");
        return Ok(0);
    }

    println!("Exercise?");
    let names: Vec<String> = choices.iter().map(|e| e.name().to_string()).collect();
    let choice = prompt.select_from_menu(&names, None)?;
    let exercise = *choices
        .get(choice)
        .with_context(|| format!("Menu choice {} out of range", choice))?;

    let mut added = 0;

    println!("Warmup?");
    if prompt.read_bool(None)? {
        let video = remaining
            .claim_next()
            .context("No video left for the warmup")?;
        let entry = Entry::warmup(video, exercise, day.num, &day.date)?;
        println!("Added \"{}\"", entry.label());
        state.add_entry(entry);
        added += 1;
    }

    if remaining.is_empty() {
        return Ok(added);
    }

    println!("Weight?");
    let weight = read_u32(prompt, IntegerPrompt::new().min(1).max(MAX_WEIGHT))?;

    let max_sets = remaining.len();
    let default_sets = DEFAULT_SETS.min(max_sets);
    println!("Sets? default: {}", default_sets);
    let sets = read_u32(
        prompt,
        IntegerPrompt::new()
            .min(1)
            .max(max_sets as i64)
            .default_value(default_sets as i64),
    )?;

    println!("Reps? default: {}", DEFAULT_REPS);
    let reps = read_u32(
        prompt,
        IntegerPrompt::new()
            .min(1)
            .default_value(i64::from(DEFAULT_REPS)),
    )?;

    for set in 1..=sets {
        println!("Set {} reps? default: {}", set, reps);
        let set_reps = read_u32(
            prompt,
            IntegerPrompt::new().min(1).default_value(i64::from(reps)),
        )?;

        println!("Set {} weight? default: {}", set, weight);
        let set_weight = read_u32(
            prompt,
            IntegerPrompt::new().min(1).default_value(i64::from(weight)),
        )?;

        let video = remaining
            .claim_next()
            .with_context(|| format!("No video left for set {}", set))?;
        let entry = Entry::new(
            video,
            exercise.name(),
            SetIndex::Number(set),
            Some(set_reps),
            Some(set_weight),
            day.num,
            &day.date,
        )?;
        println!("Added \"{}\"", entry.label());
        state.add_entry(entry);
        added += 1;
    }

    debug!("Logged {} entries for {}", added, exercise);
    Ok(added)
}
