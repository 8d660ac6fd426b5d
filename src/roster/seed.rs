//! Static seed data loaded at startup.

use crate::models::{HealthMetrics, HealthTrend, Member, Status};

#[allow(clippy::too_many_arguments)]
fn member(
    id: &str,
    name: &str,
    age: u32,
    email: &str,
    status: Status,
    last_activity: &str,
    avatar_seed: &str,
    metrics: HealthMetrics,
) -> Member {
    Member {
        id: id.to_string(),
        name: name.to_string(),
        age,
        email: email.to_string(),
        status,
        last_activity: last_activity.to_string(),
        avatar: format!("https://picsum.photos/seed/{}/100/100", avatar_seed),
        metrics,
    }
}

/// The five community members the dashboard starts with.
pub fn seed_members() -> Vec<Member> {
    vec![
        member(
            "1",
            "Sarah Jenkins",
            34,
            "sarah.j@example.com",
            Status::Active,
            "2 hours ago",
            "sarah",
            HealthMetrics {
                avg_steps: 8500,
                heart_rate: 72,
                sleep_hours: 7.5,
                stress_level: 3,
            },
        ),
        member(
            "2",
            "Marcus Chen",
            42,
            "m.chen@example.com",
            Status::AtRisk,
            "1 day ago",
            "marcus",
            HealthMetrics {
                avg_steps: 2100,
                heart_rate: 88,
                sleep_hours: 5.2,
                stress_level: 8,
            },
        ),
        member(
            "3",
            "Elena Rodriguez",
            28,
            "elena.r@example.com",
            Status::Active,
            "15 mins ago",
            "elena",
            HealthMetrics {
                avg_steps: 12000,
                heart_rate: 65,
                sleep_hours: 8.0,
                stress_level: 2,
            },
        ),
        member(
            "4",
            "David Wilson",
            55,
            "d.wilson@example.com",
            Status::Inactive,
            "1 week ago",
            "david",
            HealthMetrics {
                avg_steps: 4500,
                heart_rate: 75,
                sleep_hours: 6.5,
                stress_level: 5,
            },
        ),
        member(
            "5",
            "Amara Okafor",
            31,
            "amara.o@example.com",
            Status::Active,
            "5 hours ago",
            "amara",
            HealthMetrics {
                avg_steps: 9800,
                heart_rate: 70,
                sleep_hours: 7.2,
                stress_level: 4,
            },
        ),
    ]
}

/// Seven days of community-wide trend figures.
pub fn seed_trends() -> Vec<HealthTrend> {
    [
        ("Mon", 6000, 6.5, 70),
        ("Tue", 7200, 7.0, 75),
        ("Wed", 8100, 6.8, 82),
        ("Thu", 7800, 7.2, 78),
        ("Fri", 9500, 7.5, 88),
        ("Sat", 11000, 8.5, 95),
        ("Sun", 8500, 8.0, 85),
    ]
    .into_iter()
    .map(|(date, steps, sleep, engagement)| HealthTrend {
        date: date.to_string(),
        steps,
        sleep,
        engagement,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::store::validate_member;
    use std::collections::HashSet;

    #[test]
    fn test_seed_members_are_valid_and_unique() {
        let members = seed_members();
        assert_eq!(members.len(), 5);

        for m in &members {
            assert!(validate_member(m).is_ok(), "seed member {} invalid", m.id);
        }

        let ids: HashSet<&str> = members.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids.len(), members.len());
    }

    #[test]
    fn test_seed_trends_cover_a_week() {
        let trends = seed_trends();
        assert_eq!(trends.len(), 7);
        assert_eq!(trends[0].date, "Mon");
        assert_eq!(trends[6].date, "Sun");
        assert!(trends.iter().all(|t| t.engagement <= 100));
    }
}
