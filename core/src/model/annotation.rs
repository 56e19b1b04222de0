const IMP_TAG: &str = "[IMP:";
const URG_TAG: &str = "[URG:";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Annotation {
    pub importance: f64,
    pub urgency: f64,
}

impl Annotation {
    pub fn new(importance: f64, urgency: f64) -> Option<Self> {
        if is_probability(importance) && is_probability(urgency) {
            Some(Self { importance, urgency })
        } else {
            None
        }
    }

    pub fn parse(description: &str) -> Option<Self> {
        let (importance, rest) = read_tag(description, IMP_TAG)?;
        let (urgency, _) = read_tag(rest, URG_TAG)?;
        Self::new(importance, urgency)
    }

    /// Points added on top of the weighted score: `round(5*imp + 5*urg)`.
    pub fn bonus(&self) -> i64 {
        (0.5 * self.importance * 10.0 + 0.5 * self.urgency * 10.0).round() as i64
    }

    pub fn embed(&self, description: &str) -> String {
        let base = strip_tags(description);
        let tags = format!("[IMP:{:.2}][URG:{:.2}]", self.importance, self.urgency);
        if base.is_empty() {
            tags
        } else {
            format!("{} {}", base, tags)
        }
    }
}

fn is_probability(value: f64) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}

fn read_tag<'a>(input: &'a str, tag: &str) -> Option<(f64, &'a str)> {
    let start = input.find(tag)? + tag.len();
    let body = &input[start..];
    let end = body.find(']')?;
    let raw = &body[..end];
    if raw.contains('[') {
        return None;
    }
    let value = raw.trim().parse::<f64>().ok()?;
    Some((value, &body[end + 1..]))
}

fn strip_tags(description: &str) -> String {
    let mut out = description.to_string();
    for tag in [IMP_TAG, URG_TAG] {
        while let Some(start) = out.find(tag) {
            match out[start..].find(']') {
                Some(len) => out.replace_range(start..start + len + 1, ""),
                None => break,
            }
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn parses_adjacent_tags() {
        let a = Annotation::parse("Ship it [IMP:0.8][URG:0.4]").unwrap();
        assert_eq!(a.importance, 0.8);
        assert_eq!(a.urgency, 0.4);
        assert_eq!(a.bonus(), 6);
    }

    #[test]
    fn parses_tags_with_text_between() {
        let a = Annotation::parse("[IMP:1] quarterly report [URG:0]").unwrap();
        assert_eq!(a.bonus(), 5);
    }

    #[test]
    fn bonus_rounds_half_away_from_zero() {
        // 5*0.5 + 5*0.0 = 2.5
        let a = Annotation::new(0.5, 0.0).unwrap();
        assert_eq!(a.bonus(), 3);
        assert_eq!(Annotation::new(1.0, 1.0).unwrap().bonus(), 10);
    }

    #[rstest]
    #[case("")]
    #[case("no annotation here")]
    #[case("[IMP:0.5]")]
    #[case("[URG:0.5][IMP:0.5]")]
    #[case("[IMP:high][URG:0.5]")]
    #[case("[IMP:0.5][URG:0.5")]
    #[case("[IMP:0.5 [URG:0.5]")]
    #[case("[IMP:1.5][URG:0.5]")]
    #[case("[IMP:-0.1][URG:0.5]")]
    #[case("[IMP:NaN][URG:0.5]")]
    #[case("[IMP:inf][URG:0.5]")]
    fn malformed_input_is_ignored(#[case] description: &str) {
        assert_eq!(Annotation::parse(description), None);
    }

    #[test]
    fn embed_replaces_existing_tags() {
        let a = Annotation::new(0.25, 0.75).unwrap();
        let out = a.embed("Prepare slides [IMP:0.10][URG:0.10]");
        assert_eq!(out, "Prepare slides [IMP:0.25][URG:0.75]");
        assert_eq!(Annotation::parse(&out), Some(a));
    }

    #[test]
    fn embed_on_empty_description() {
        let a = Annotation::new(1.0, 0.0).unwrap();
        assert_eq!(a.embed(""), "[IMP:1.00][URG:0.00]");
    }
}
