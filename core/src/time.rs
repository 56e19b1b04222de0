use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc, Weekday};
use anyhow::{anyhow, Result};

/// Parses a human due date relative to `now`, in `now`'s time zone.
///
/// Accepted: `today`/`tod`, `tomorrow`/`tom`, `eow`, `+Nd`, `+Nw`, weekday
/// names (`fri`, `friday`, always the next one strictly after today),
/// `YYYY-MM-DD` and `YYYY-MM-DD HH:MM`. Date-only forms resolve to 23:59:59.
pub fn parse_due<Tz: TimeZone>(input: &str, now: &DateTime<Tz>) -> Result<DateTime<Utc>> {
    let tz = now.timezone();
    let today = now.date_naive();
    let token = input.trim().to_lowercase();

    match token.as_str() {
        "today" | "tod" => return end_of_day(&tz, today),
        "tomorrow" | "tom" => return end_of_day(&tz, today + Duration::days(1)),
        "eow" => {
            let to_sunday = 6 - today.weekday().num_days_from_monday() as i64;
            return end_of_day(&tz, today + Duration::days(to_sunday));
        }
        _ => {}
    }

    if let Some(rest) = token.strip_prefix('+') {
        let target = today
            .checked_add_signed(parse_offset(rest)?)
            .ok_or_else(|| anyhow!("Date out of range: {}", input))?;
        return end_of_day(&tz, target);
    }

    if let Some(weekday) = parse_weekday(&token) {
        let mut ahead = weekday.num_days_from_monday() as i64
            - today.weekday().num_days_from_monday() as i64;
        if ahead <= 0 {
            ahead += 7;
        }
        return end_of_day(&tz, today + Duration::days(ahead));
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(&token, "%Y-%m-%d %H:%M") {
        return localize(&tz, dt);
    }
    if let Ok(d) = NaiveDate::parse_from_str(&token, "%Y-%m-%d") {
        return end_of_day(&tz, d);
    }

    Err(anyhow!("Could not parse date: {}", input))
}

fn parse_offset(rest: &str) -> Result<Duration> {
    let (split, _) = rest
        .char_indices()
        .last()
        .ok_or_else(|| anyhow!("Invalid relative format: +{}", rest))?;
    let (num, unit) = rest.split_at(split);
    let count: i64 = num
        .parse()
        .map_err(|_| anyhow!("Invalid relative format: +{}", rest))?;
    let offset = match unit {
        "d" => Duration::try_days(count),
        "w" => Duration::try_weeks(count),
        _ => return Err(anyhow!("Unknown unit in relative time: {}", unit)),
    };
    offset.ok_or_else(|| anyhow!("Relative offset too large: +{}", rest))
}

fn parse_weekday(s: &str) -> Option<Weekday> {
    match s {
        "mon" | "monday" => Some(Weekday::Mon),
        "tue" | "tuesday" => Some(Weekday::Tue),
        "wed" | "wednesday" => Some(Weekday::Wed),
        "thu" | "thursday" => Some(Weekday::Thu),
        "fri" | "friday" => Some(Weekday::Fri),
        "sat" | "saturday" => Some(Weekday::Sat),
        "sun" | "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

fn end_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Result<DateTime<Utc>> {
    let dt = date
        .and_hms_opt(23, 59, 59)
        .ok_or_else(|| anyhow!("Invalid date: {}", date))?;
    localize(tz, dt)
}

fn localize<Tz: TimeZone>(tz: &Tz, dt: NaiveDateTime) -> Result<DateTime<Utc>> {
    tz.from_local_datetime(&dt)
        .earliest()
        .map(|d| d.with_timezone(&Utc))
        .ok_or_else(|| anyhow!("{} does not exist in the local time zone", dt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // Friday
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 12, 9, 30, 0).unwrap()
    }

    fn eod(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 23, 59, 59).unwrap()
    }

    #[rstest]
    #[case("today", eod(2024, 1, 12))]
    #[case("TOM", eod(2024, 1, 13))]
    #[case("eow", eod(2024, 1, 14))]
    #[case("+3d", eod(2024, 1, 15))]
    #[case("+2w", eod(2024, 1, 26))]
    #[case("mon", eod(2024, 1, 15))]
    #[case("fri", eod(2024, 1, 19))]
    #[case("2024-02-01", eod(2024, 2, 1))]
    #[case("2024-02-01 08:15", Utc.with_ymd_and_hms(2024, 2, 1, 8, 15, 0).unwrap())]
    fn parses_supported_forms(#[case] input: &str, #[case] expected: DateTime<Utc>) {
        assert_eq!(parse_due(input, &now()).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("+")]
    #[case("+d")]
    #[case("+3y")]
    #[case("someday")]
    #[case("2024-13-01")]
    #[case("+3é")]
    #[case("+999999999999d")]
    #[case("+99999999w")]
    fn rejects_unknown_input(#[case] input: &str) {
        assert!(parse_due(input, &now()).is_err());
    }
}
