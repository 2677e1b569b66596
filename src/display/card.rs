//! Event card and activity feed formatting.

use chrono::{DateTime, Utc};

use crate::domain::{Sport, parse_event_date};

const BASKETBALL_IMAGE: &str = "https://slelguoygbfzlpylpxfs.supabase.co/storage/v1/object/public/project-uploads/da26eebf-2b36-44a6-ba7b-cdfa1fcb3869/generated_images/dramatic-basketball-game-action-shot-wit-b19f013c-20251005162139.jpg";
const FOOTBALL_IMAGE: &str = "https://slelguoygbfzlpylpxfs.supabase.co/storage/v1/object/public/project-uploads/da26eebf-2b36-44a6-ba7b-cdfa1fcb3869/generated_images/american-football-touchdown-celebration--bf30bfd9-20251005162149.jpg";
const SOCCER_IMAGE: &str = "https://v3b.fal.media/files/b/lion/ZFGey5kg5QMSl0ue9M0tj_output.png";
const BASEBALL_IMAGE: &str = "https://slelguoygbfzlpylpxfs.supabase.co/storage/v1/object/public/project-uploads/da26eebf-2b36-44a6-ba7b-cdfa1fcb3869/generated_images/baseball-home-run-celebration-at-night-g-90b12a03-20251005162209.jpg";
const HOCKEY_IMAGE: &str = "https://slelguoygbfzlpylpxfs.supabase.co/storage/v1/object/public/project-uploads/da26eebf-2b36-44a6-ba7b-cdfa1fcb3869/generated_images/ice-hockey-action-shot-with-player-scori-ca69198d-20251005162220.jpg";
const TENNIS_IMAGE: &str = "https://slelguoygbfzlpylpxfs.supabase.co/storage/v1/object/public/project-uploads/da26eebf-2b36-44a6-ba7b-cdfa1fcb3869/generated_images/tennis-championship-match-point-celebrat-80e43cb9-20251005162230.jpg";
const CRICKET_IMAGE: &str = "https://slelguoygbfzlpylpxfs.supabase.co/storage/v1/object/public/project-uploads/da26eebf-2b36-44a6-ba7b-cdfa1fcb3869/generated_images/cricket-match-action-shot-with-batsman-h-fcc96b37-20251008062219.jpg";
const F1_IMAGE: &str = "https://v3b.fal.media/files/b/elephant/vcge_23vdWBJhjMXZBMDy_output.png";

/// Fallback card image for a sport. Unknown sports get the basketball
/// image.
#[must_use]
pub fn fallback_image(sport: &str) -> &'static str {
    match Sport::recognize(sport) {
        Some(Sport::Football) => FOOTBALL_IMAGE,
        Some(Sport::Soccer) => SOCCER_IMAGE,
        Some(Sport::Baseball) => BASEBALL_IMAGE,
        Some(Sport::Hockey) => HOCKEY_IMAGE,
        Some(Sport::Tennis) => TENNIS_IMAGE,
        Some(Sport::Cricket) => CRICKET_IMAGE,
        Some(Sport::F1) => F1_IMAGE,
        Some(Sport::Basketball) | None => BASKETBALL_IMAGE,
    }
}

/// The image shown on an event card: the event's own image if it has a
/// non-empty one, otherwise the sport fallback.
#[must_use]
pub fn card_image<'a>(image_url: Option<&'a str>, sport: &str) -> &'a str {
    match image_url.filter(|url| !url.trim().is_empty()) {
        Some(url) => url,
        None => fallback_image(sport),
    }
}

/// Returns `true` if the event date lies after `now`. Unparseable dates
/// are never upcoming.
#[must_use]
pub fn is_upcoming(date: &str, now: DateTime<Utc>) -> bool {
    parse_event_date(date).is_some_and(|at| at > now)
}

/// Relative timestamp for the activity feed.
///
/// Anything under a week is relative (`just now`, `5m ago`, `3h ago`,
/// `2d ago`); older entries show the month and day, e.g. `Mar 5`.
#[must_use]
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    match seconds {
        s if s < 60 => "just now".to_string(),
        s if s < 3_600 => format!("{}m ago", s / 60),
        s if s < 86_400 => format!("{}h ago", s / 3_600),
        s if s < 604_800 => format!("{}d ago", s / 86_400),
        _ => then.format("%b %-d").to_string(),
    }
}
