use crate::errors::StoreError;
use crate::metrics::{clamped_progress, status_for, streak_after};
use crate::models::{Goal, GoalPatch, NewGoal};
use crate::storage::{load_slot, persist_slot};
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// The client-side goal collection. Loaded from its storage slot once at
/// construction; the full collection is written back after every effective
/// mutation, so it survives an application restart.
///
/// Mutations on unknown ids are silent no-ops: the collection is left
/// untouched and nothing is persisted.
#[derive(Clone)]
pub struct GoalStore {
    path: PathBuf,
    goals: Arc<Mutex<Vec<Goal>>>,
}

impl GoalStore {
    pub async fn open(path: PathBuf) -> Self {
        let goals: Vec<Goal> = load_slot(&path).await;
        Self {
            path,
            goals: Arc::new(Mutex::new(goals)),
        }
    }

    /// Snapshot of the collection in insertion order.
    pub async fn goals(&self) -> Vec<Goal> {
        self.goals.lock().await.clone()
    }

    pub async fn goal(&self, id: i64) -> Option<Goal> {
        self.goals.lock().await.iter().find(|g| g.id == id).cloned()
    }

    pub async fn add_goal(&self, new_goal: NewGoal) -> Result<(), StoreError> {
        let mut goals = self.goals.lock().await;
        let goal = Goal {
            id: next_id(&goals),
            title: new_goal.title,
            goal_type: new_goal.goal_type,
            target_value: new_goal.target_value,
            current_value: new_goal.current_value,
            unit: new_goal.unit,
            start_date: new_goal.start_date,
            end_date: new_goal.end_date,
            status: new_goal.status,
            streak: new_goal.streak,
        };
        goals.push(goal);
        persist_slot(&self.path, &*goals).await
    }

    /// Merge `patch` onto the matching goal. Derived fields are not
    /// recomputed here; a caller changing `target_value` or `current_value`
    /// directly owns their consistency.
    pub async fn update_goal(&self, id: i64, patch: GoalPatch) -> Result<(), StoreError> {
        let mut goals = self.goals.lock().await;
        let Some(goal) = goals.iter_mut().find(|g| g.id == id) else {
            return Ok(());
        };
        if let Some(title) = patch.title {
            goal.title = title;
        }
        if let Some(goal_type) = patch.goal_type {
            goal.goal_type = goal_type;
        }
        if let Some(target_value) = patch.target_value {
            goal.target_value = target_value;
        }
        if let Some(current_value) = patch.current_value {
            goal.current_value = current_value;
        }
        if let Some(unit) = patch.unit {
            goal.unit = unit;
        }
        if let Some(start_date) = patch.start_date {
            goal.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            goal.end_date = Some(end_date);
        }
        if let Some(status) = patch.status {
            goal.status = status;
        }
        if let Some(streak) = patch.streak {
            goal.streak = streak;
        }
        persist_slot(&self.path, &*goals).await
    }

    pub async fn delete_goal(&self, id: i64) -> Result<(), StoreError> {
        let mut goals = self.goals.lock().await;
        let before = goals.len();
        goals.retain(|g| g.id != id);
        if goals.len() == before {
            return Ok(());
        }
        persist_slot(&self.path, &*goals).await
    }

    /// Apply a progress increment and recompute the derived fields in one
    /// step: the new value is held within `0..=target_value`, the streak
    /// follows the sign of the increment, and the status flips to
    /// `Completed` exactly when the target is reached.
    pub async fn update_progress(&self, id: i64, increment: f64) -> Result<(), StoreError> {
        let mut goals = self.goals.lock().await;
        let Some(goal) = goals.iter_mut().find(|g| g.id == id) else {
            return Ok(());
        };
        goal.current_value = clamped_progress(goal.current_value, increment, goal.target_value);
        goal.streak = streak_after(goal.streak, increment);
        goal.status = status_for(goal.current_value, goal.target_value);
        persist_slot(&self.path, &*goals).await
    }
}

fn next_id(goals: &[Goal]) -> i64 {
    goals.iter().map(|g| g.id).max().unwrap_or(0) + 1
}
