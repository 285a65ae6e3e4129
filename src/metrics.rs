use crate::models::{Goal, GoalStatus, Product};
use std::collections::HashSet;

/// Percentage of a goal's target reached, rounded to the nearest whole
/// number. A goal with no target to reach counts as fully met.
pub fn progress_percent(current_value: f64, target_value: f64) -> u32 {
    if target_value <= 0.0 {
        return 100;
    }
    (current_value / target_value * 100.0).round() as u32
}

/// Rounded mean of each goal's progress percentage; 0 over an empty set.
pub fn average_progress(goals: &[Goal]) -> u32 {
    if goals.is_empty() {
        return 0;
    }
    let total: f64 = goals
        .iter()
        .map(|goal| f64::from(progress_percent(goal.current_value, goal.target_value)))
        .sum();
    (total / goals.len() as f64).round() as u32
}

/// Number of distinct categories across the product library.
pub fn distinct_categories(products: &[Product]) -> usize {
    products
        .iter()
        .map(|product| product.category)
        .collect::<HashSet<_>>()
        .len()
}

/// Number of products currently in the routine.
pub fn active_count(products: &[Product]) -> usize {
    products.iter().filter(|product| product.active).count()
}

/// Progress value after applying an increment, held within
/// `0..=target_value`.
pub fn clamped_progress(current_value: f64, increment: f64, target_value: f64) -> f64 {
    (current_value + increment).min(target_value).max(0.0)
}

/// Streak counts the sign of the increment, not whether the clamp let the
/// value move: positive increments extend it, anything else shrinks it
/// toward zero.
pub fn streak_after(streak: u32, increment: f64) -> u32 {
    if increment > 0.0 {
        streak + 1
    } else {
        streak.saturating_sub(1)
    }
}

pub fn status_for(current_value: f64, target_value: f64) -> GoalStatus {
    if current_value >= target_value {
        GoalStatus::Completed
    } else {
        GoalStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GoalType, ProductCategory};
    use chrono::NaiveDate;

    fn goal(current_value: f64, target_value: f64) -> Goal {
        Goal {
            id: 1,
            title: "Daily Sunscreen".to_string(),
            goal_type: GoalType::SunscreenConsistency,
            target_value,
            current_value,
            unit: "days".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: None,
            status: GoalStatus::Active,
            streak: 0,
        }
    }

    fn product(category: ProductCategory, active: bool) -> Product {
        Product {
            id: 1,
            name: "Gentle Cleanser".to_string(),
            category,
            brand: None,
            key_ingredients: None,
            frequency: None,
            notes: None,
            active,
            started_date: None,
        }
    }

    #[test]
    fn progress_percent_rounds_to_nearest() {
        assert_eq!(progress_percent(22.0, 30.0), 73);
        assert_eq!(progress_percent(1.0, 3.0), 33);
        assert_eq!(progress_percent(2.0, 3.0), 67);
        assert_eq!(progress_percent(30.0, 30.0), 100);
    }

    #[test]
    fn progress_percent_zero_target_is_fully_met() {
        assert_eq!(progress_percent(0.0, 0.0), 100);
        assert_eq!(progress_percent(5.0, 0.0), 100);
    }

    #[test]
    fn average_progress_empty_set_is_zero() {
        assert_eq!(average_progress(&[]), 0);
    }

    #[test]
    fn average_progress_means_the_percentages() {
        let goals = [goal(22.0, 30.0), goal(3.0, 5.0)];
        // 73 and 60
        assert_eq!(average_progress(&goals), 67);
    }

    #[test]
    fn distinct_categories_ignores_duplicates() {
        let products = [
            product(ProductCategory::Cleanser, true),
            product(ProductCategory::Moisturizer, true),
            product(ProductCategory::Cleanser, false),
        ];
        assert_eq!(distinct_categories(&products), 2);
        assert_eq!(active_count(&products), 2);
    }

    #[test]
    fn clamped_progress_holds_both_bounds() {
        assert_eq!(clamped_progress(29.0, 5.0, 30.0), 30.0);
        assert_eq!(clamped_progress(1.0, -5.0, 30.0), 0.0);
        assert_eq!(clamped_progress(10.0, 2.5, 30.0), 12.5);
    }

    #[test]
    fn streak_follows_the_sign_of_the_increment() {
        assert_eq!(streak_after(7, 1.0), 8);
        assert_eq!(streak_after(7, -1.0), 6);
        assert_eq!(streak_after(0, -1.0), 0);
        // a zero increment is not positive progress
        assert_eq!(streak_after(3, 0.0), 2);
    }

    #[test]
    fn status_flips_exactly_at_the_target() {
        assert_eq!(status_for(29.9, 30.0), GoalStatus::Active);
        assert_eq!(status_for(30.0, 30.0), GoalStatus::Completed);
        assert_eq!(status_for(31.0, 30.0), GoalStatus::Completed);
    }
}
