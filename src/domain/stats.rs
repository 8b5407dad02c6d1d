use chrono::{Datelike, NaiveDate, Utc};

use crate::domain::User;

/// Aggregated figures for the dashboard view, computed from one emission of
/// the live user list.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub total_users: usize,
    /// Mean age over the users that have a birth date, rounded to whole
    /// years. Zero when none of them have one.
    pub average_age: i32,
    /// Users whose birthday falls in the current calendar month.
    pub birthdays_this_month: usize,
    /// The last three users of the list, in list order.
    pub recent_users: Vec<User>,
}

impl DashboardStats {
    pub fn from_users(users: &[User]) -> Self {
        Self::from_users_on(users, Utc::now().date_naive())
    }

    /// Same computation with an explicit reference date.
    pub fn from_users_on(users: &[User], today: NaiveDate) -> Self {
        let ages: Vec<i32> = users.iter().filter_map(|user| user.age_on(today)).collect();
        let average_age = if ages.is_empty() {
            0
        } else {
            (f64::from(ages.iter().sum::<i32>()) / ages.len() as f64).round() as i32
        };

        let birthdays_this_month = users
            .iter()
            .filter(|user| {
                user.birth_date
                    .is_some_and(|date| date.month() == today.month())
            })
            .count();

        let recent_users = users
            .iter()
            .skip(users.len().saturating_sub(3))
            .cloned()
            .collect();

        Self {
            total_users: users.len(),
            average_age,
            birthdays_this_month,
            recent_users,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn user_born(first_name: &str, y: i32, m: u32, d: u32) -> User {
        let mut user = User::new(first_name, "Tester");
        user.birth_date = Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).single();
        user
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn empty_list_yields_zeroes() {
        let stats = DashboardStats::from_users_on(&[], today());
        assert_eq!(stats.total_users, 0);
        assert_eq!(stats.average_age, 0);
        assert_eq!(stats.birthdays_this_month, 0);
        assert!(stats.recent_users.is_empty());
    }

    #[test]
    fn average_age_ignores_users_without_birth_date() {
        let users = vec![
            user_born("A", 2000, 1, 1), // 24
            user_born("B", 1990, 1, 1), // 34
            User::new("C", "Tester"),   // no birth date
        ];
        let stats = DashboardStats::from_users_on(&users, today());
        assert_eq!(stats.average_age, 29);
        assert_eq!(stats.total_users, 3);
    }

    #[test]
    fn average_age_is_zero_when_no_birth_dates() {
        let users = vec![User::new("A", "Tester"), User::new("B", "Tester")];
        let stats = DashboardStats::from_users_on(&users, today());
        assert_eq!(stats.average_age, 0);
    }

    #[test]
    fn birthdays_counted_by_month_of_year() {
        let users = vec![
            user_born("A", 2000, 6, 15),
            user_born("B", 1985, 6, 2),
            user_born("C", 1990, 12, 24),
        ];
        let stats = DashboardStats::from_users_on(&users, today());
        assert_eq!(stats.birthdays_this_month, 2);
    }

    #[test]
    fn recent_users_are_the_last_three_in_order() {
        let users: Vec<User> = ["A", "B", "C", "D", "E"]
            .iter()
            .map(|name| User::new(*name, "Tester"))
            .collect();
        let stats = DashboardStats::from_users_on(&users, today());
        let names: Vec<&str> = stats
            .recent_users
            .iter()
            .map(|user| user.first_name.as_str())
            .collect();
        assert_eq!(names, vec!["C", "D", "E"]);
    }

    #[test]
    fn recent_users_with_short_list() {
        let users = vec![User::new("A", "Tester")];
        let stats = DashboardStats::from_users_on(&users, today());
        assert_eq!(stats.recent_users.len(), 1);
    }
}
