/// Points for a group schedule mentioning the token's day
pub const DAY_POINTS: f64 = 2.0;

/// Extra points when the schedule also mentions the token's time of day
pub const TIME_OF_DAY_POINTS: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// Lowercase name used for substring search
    pub fn keyword(self) -> &'static str {
        match self {
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
            Day::Sunday => "sunday",
        }
    }

    pub fn parse(word: &str) -> Option<Self> {
        let word = word.to_lowercase();
        Self::ALL.into_iter().find(|day| day.keyword() == word)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 3] = [TimeOfDay::Morning, TimeOfDay::Afternoon, TimeOfDay::Evening];

    pub fn keyword(self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
        }
    }

    pub fn parse(word: &str) -> Option<Self> {
        let word = word.to_lowercase();
        Self::ALL.into_iter().find(|time| time.keyword() == word)
    }
}

/// One slot a learner is free, e.g. "Monday Evening"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AvailabilitySlot {
    pub day: Day,
    pub time_of_day: TimeOfDay,
}

impl AvailabilitySlot {
    /// Parse a `"<Day> <TimeOfDay>"` token, case-insensitively.
    ///
    /// Returns `None` for anything outside the fixed vocabulary.
    pub fn parse(token: &str) -> Option<Self> {
        let mut words = token.split_whitespace();
        let day = Day::parse(words.next()?)?;
        let time_of_day = TimeOfDay::parse(words.next()?)?;

        if words.next().is_some() {
            return None;
        }

        Some(Self { day, time_of_day })
    }
}

/// Schedule points for a learner's availability against a group's
/// free-text schedule, capped at `cap`.
///
/// Each parsed slot earns [`DAY_POINTS`] when the schedule mentions its
/// day, plus [`TIME_OF_DAY_POINTS`] when it also mentions its time of day.
/// Unparseable slots earn nothing.
pub fn calculate_schedule_points(availability: &[String], group_schedule: &str, cap: f64) -> f64 {
    let schedule_text = group_schedule.to_lowercase();

    let points: f64 = availability
        .iter()
        .filter_map(|token| AvailabilitySlot::parse(token))
        .map(|slot| {
            if !schedule_text.contains(slot.day.keyword()) {
                return 0.0;
            }

            if schedule_text.contains(slot.time_of_day.keyword()) {
                DAY_POINTS + TIME_OF_DAY_POINTS
            } else {
                DAY_POINTS
            }
        })
        .sum();

    points.min(cap.max(0.0))
}
