use chrono::{DateTime, Duration, Utc};
use woohoo_protocol::{FriendRecord, UserSummary, WoohooRecord};

/// People offered on the "add friends" screen and returned by user search.
pub fn sample_friends() -> Vec<FriendRecord> {
    vec![
        FriendRecord::new("1", "Ethan Gibbs", "ethangibbs", "https://randomuser.me/api/portraits/men/1.jpg"),
        FriendRecord::new("2", "Ethan Gibbs", "ethangibbs", "https://randomuser.me/api/portraits/men/2.jpg"),
        FriendRecord::new("3", "Ethan Gibbs", "ethangibbs", "https://randomuser.me/api/portraits/men/3.jpg"),
        FriendRecord::new("4", "Ethan Gibbs", "ethannnnn", "https://randomuser.me/api/portraits/men/4.jpg"),
        FriendRecord::new("5", "Ethan Gibbs", "bigibsdfhb", "https://randomuser.me/api/portraits/men/5.jpg"),
        FriendRecord::new("6", "Ethan Gibbs", "fdafsdfra", "https://randomuser.me/api/portraits/men/6.jpg"),
        FriendRecord::new("7", "Ethan Gibbs", "fdafsdfra", "https://randomuser.me/api/portraits/men/7.jpg"),
        FriendRecord::new("8", "Daniela Munoz", "danielamunoz", "https://randomuser.me/api/portraits/women/1.jpg"),
        FriendRecord::new("9", "Carter Dessommes", "carterd", "https://randomuser.me/api/portraits/men/8.jpg"),
    ]
}

/// Whoever is on the other end of every simulated tap.
pub fn tap_partner() -> FriendRecord {
    FriendRecord::new("123", "Alexis", "alexis", "https://randomuser.me/api/portraits/women/68.jpg")
}

fn person(id: &str, name: &str, profile_pic: &str) -> UserSummary {
    UserSummary {
        id: id.to_string(),
        name: name.to_string(),
        profile_pic: profile_pic.to_string(),
    }
}

fn meetup(id: &str, user1: UserSummary, user2: UserSummary, location: &str, timestamp: DateTime<Utc>) -> WoohooRecord {
    WoohooRecord {
        id: id.to_string(),
        user1,
        user2,
        location: location.to_string(),
        timestamp,
    }
}

/// Historical meetups shown under the session's own woohoos, dated
/// relative to `now`.
pub fn seed_feed(now: DateTime<Utc>) -> Vec<WoohooRecord> {
    vec![
        meetup(
            "1",
            person("101", "Marshall", "https://randomuser.me/api/portraits/men/32.jpg"),
            person("102", "Alexis", "https://randomuser.me/api/portraits/women/68.jpg"),
            "pine crest school",
            now - Duration::hours(20),
        ),
        meetup(
            "2",
            person("103", "Catherine", "https://randomuser.me/api/portraits/women/44.jpg"),
            person("104", "Jonathan", "https://randomuser.me/api/portraits/men/22.jpg"),
            "exploratorium",
            now - Duration::days(1),
        ),
        meetup(
            "3",
            person("105", "Matthew", "https://randomuser.me/api/portraits/men/62.jpg"),
            person("106", "Michael", "https://randomuser.me/api/portraits/men/91.jpg"),
            "2727 edison st",
            now - Duration::days(3),
        ),
        meetup(
            "4",
            person("107", "Max", "https://randomuser.me/api/portraits/men/29.jpg"),
            person("108", "Kylee", "https://randomuser.me/api/portraits/women/89.jpg"),
            "starbucks",
            now - Duration::days(6),
        ),
        meetup(
            "5",
            person("109", "Gabby", "https://randomuser.me/api/portraits/women/22.jpg"),
            person("110", "Harry", "https://randomuser.me/api/portraits/men/55.jpg"),
            "1171 mission st",
            now - Duration::days(7),
        ),
        meetup(
            "6",
            person("111", "Eleanor", "https://randomuser.me/api/portraits/women/33.jpg"),
            person("112", "Lexi", "https://randomuser.me/api/portraits/women/66.jpg"),
            "stanford university",
            now - Duration::days(7),
        ),
        meetup(
            "7",
            person("113", "Carter", "https://randomuser.me/api/portraits/men/78.jpg"),
            person("114", "Lacy", "https://randomuser.me/api/portraits/women/12.jpg"),
            "golden gate park",
            now - Duration::days(10),
        ),
    ]
}
