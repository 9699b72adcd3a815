// src/layout/tasks.rs

//! Task list layout: a random handful of open tasks, each prefixed by the color
//! tile of the list it came from.

use super::{LayoutError, LayoutResult, COLS};
use crate::glyph::{normalize_line, Tile};
use crate::grid::{Background, ROWS};
use crate::records::Task;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Maps task lists to an icon: a list belongs to the category if its name contains
/// `keyword` (case-sensitive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCategory {
    pub keyword: String,
    pub tile: Tile,
}

impl TaskCategory {
    pub fn new(keyword: &str, tile: Tile) -> Self {
        Self {
            keyword: keyword.to_string(),
            tile,
        }
    }
}

/// The default category table.
pub fn default_categories() -> Vec<TaskCategory> {
    vec![
        TaskCategory::new("Work", Tile::Blue),
        TaskCategory::new("Home", Tile::Green),
        TaskCategory::new("Shopping", Tile::Yellow),
        TaskCategory::new("Family", Tile::Violet),
    ]
}

/// Icon for a list name, from the first matching category.
pub fn category_tile(list_name: &str, categories: &[TaskCategory]) -> Option<Tile> {
    categories
        .iter()
        .find(|category| list_name.contains(category.keyword.as_str()))
        .map(|category| category.tile)
}

/// Collapses line breaks and every run of non-letters into a single space.
pub fn sanitize_notes(notes: &str) -> String {
    let mut out = String::with_capacity(notes.len());
    let mut in_gap = false;
    for c in notes.chars() {
        if c.is_alphabetic() {
            out.push(c);
            in_gap = false;
        } else if !in_gap {
            out.push(' ');
            in_gap = true;
        }
    }
    out.trim().to_string()
}

/// `icon + title`, plus `": " + notes` when the notes have any letters.
/// Cut to `COLS` characters.
pub fn format_task(tile: Tile, task: &Task) -> String {
    let mut row = String::new();
    row.push(tile.glyph());
    row.push_str(task.title.trim());
    if let Some(notes) = task.notes.as_deref() {
        let notes = sanitize_notes(notes);
        if !notes.is_empty() {
            row.push_str(": ");
            row.push_str(&notes);
        }
    }
    normalize_line(&row).chars().take(COLS).collect()
}

/// Samples up to `ROWS` categorized tasks.
///
/// # Errors
/// `NoTasks` when no task belongs to a known list.
pub fn layout(
    tasks: &[Task],
    categories: &[TaskCategory],
    rng: &mut impl Rng,
) -> Result<LayoutResult, LayoutError> {
    let known: Vec<(Tile, &Task)> = tasks
        .iter()
        .filter_map(|task| category_tile(&task.list_name, categories).map(|tile| (tile, task)))
        .collect();
    if known.is_empty() {
        return Err(LayoutError::NoTasks { total: tasks.len() });
    }

    let lines: Vec<String> = known
        .choose_multiple(rng, ROWS)
        .map(|(tile, task)| format_task(*tile, task))
        .collect();
    debug!(
        "tasks: showing {} of {} categorized ({} total)",
        lines.len(),
        known.len(),
        tasks.len()
    );
    LayoutResult::new(lines, Background::Blank)
}

#[cfg(test)]
mod tests;
