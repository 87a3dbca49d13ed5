//! Fixed answer codes offered by the survey screens.
//!
//! Every enum serialises to the short code the webhook consumers expect and
//! carries a human label for the terminal front end.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Shared behaviour of every fixed-choice answer.
pub trait Choice: Copy + PartialEq + 'static {
    fn all() -> &'static [Self];
    fn code(self) -> &'static str;
    fn label(self) -> &'static str;

    /// True for the explicit "none of these" sentinel.
    fn is_none_sentinel(self) -> bool {
        self.code() == "none"
    }

    fn from_code(code: &str) -> Option<Self> {
        let needle = code.trim();
        Self::all()
            .iter()
            .copied()
            .find(|candidate| candidate.code().eq_ignore_ascii_case(needle))
    }
}

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => ($code:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $code)]
                $variant,
            )+
        }

        impl Choice for $name {
            fn all() -> &'static [Self] {
                &[$($name::$variant),+]
            }

            fn code(self) -> &'static str {
                match self {
                    $($name::$variant => $code,)+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

choice_enum! {
    Gender {
        Male => ("male", "Male"),
        Female => ("female", "Female"),
        NonBinary => ("non-binary", "Non-binary"),
    }
}

choice_enum! {
    AgeRange {
        From18To29 => ("18-29", "18-29"),
        From30To39 => ("30-39", "30-39"),
        From40To49 => ("40-49", "40-49"),
        From50 => ("50+", "50+"),
    }
}

choice_enum! {
    BodyType {
        Ectomorph => ("ectomorph", "Ectomorph (slim, fast metabolism)"),
        Mesomorph => ("mesomorph", "Mesomorph (athletic, builds muscle easily)"),
        Endomorph => ("endomorph", "Endomorph (stores fat easily)"),
    }
}

choice_enum! {
    FitnessGoal {
        LoseWeight => ("lose-weight", "Lose weight"),
        BuildMuscle => ("build-muscle", "Build muscle"),
        GetToned => ("get-toned", "Get toned"),
        ImproveHealth => ("improve-health", "Improve overall health"),
    }
}

choice_enum! {
    DesiredBody {
        Slim => ("slim", "Slim"),
        Toned => ("toned", "Toned"),
        Athletic => ("athletic", "Athletic"),
        Muscular => ("muscular", "Muscular"),
    }
}

choice_enum! {
    ProblemArea {
        None => ("none", "None, I like my body"),
        Arms => ("arms", "Arms"),
        Chest => ("chest", "Chest"),
        Belly => ("belly", "Belly"),
        Back => ("back", "Back"),
        Glutes => ("glutes", "Glutes"),
        FrontThighs => ("front-thighs", "Front thighs"),
        BackThighs => ("back-thighs", "Back thighs"),
        Calves => ("calves", "Calves"),
    }
}

choice_enum! {
    BestShape {
        UnderAYear => ("less-than-year", "Less than a year ago"),
        OneToThreeYears => ("1-3-years", "1 to 3 years ago"),
        OverThreeYears => ("more-than-3-years", "More than 3 years ago"),
        Never => ("never", "Never"),
    }
}

choice_enum! {
    WeightChangePattern {
        GainFastLoseSlow => ("gain-fast-lose-slow", "I gain weight fast but lose it slowly"),
        GainAndLoseEasily => ("gain-lose-easily", "I gain and lose weight easily"),
        HardToGain => ("hard-to-gain", "I struggle to gain weight or muscle"),
        Stable => ("stable", "My weight barely changes"),
    }
}

choice_enum! {
    StartCommitment {
        Today => ("today", "Today"),
        ThisWeek => ("this-week", "This week"),
        NextWeek => ("next-week", "Next week"),
        NextMonth => ("next-month", "Within a month"),
    }
}

choice_enum! {
    WeightUnit {
        Kg => ("kg", "Kilograms"),
        Lbs => ("lbs", "Pounds"),
    }
}

choice_enum! {
    WorkoutLocation {
        Home => ("home", "At home"),
        Gym => ("gym", "At the gym"),
        Outdoors => ("outdoors", "Outdoors"),
        Mixed => ("mixed", "A mix of places"),
    }
}

choice_enum! {
    WorkoutIntensity {
        Light => ("light", "Light"),
        Moderate => ("moderate", "Moderate"),
        Intense => ("intense", "Intense"),
    }
}

choice_enum! {
    WorkoutFrequency {
        Rarely => ("rarely", "Rarely or never"),
        OnceOrTwice => ("1-2", "1-2 times a week"),
        ThreeTimes => ("3", "3 times a week"),
        FourTimes => ("4", "4 times a week"),
        FivePlus => ("5+", "5 or more times a week"),
    }
}

impl WorkoutFrequency {
    /// Score bucket (1-5) fed into the fitness score.
    pub fn bucket(self) -> u8 {
        match self {
            WorkoutFrequency::Rarely => 1,
            WorkoutFrequency::OnceOrTwice => 2,
            WorkoutFrequency::ThreeTimes => 3,
            WorkoutFrequency::FourTimes => 4,
            WorkoutFrequency::FivePlus => 5,
        }
    }
}

choice_enum! {
    WorkoutDuration {
        Short => ("15-30", "15-30 minutes"),
        Medium => ("30-45", "30-45 minutes"),
        Long => ("45-60", "45-60 minutes"),
        Extended => ("60+", "More than an hour"),
    }
}

choice_enum! {
    EquipmentAccess {
        None => ("none", "No equipment"),
        Basic => ("basic", "Basic home equipment"),
        FullGym => ("full-gym", "Full gym"),
    }
}

choice_enum! {
    Exercise {
        Squats => ("squats", "Squats"),
        PushUps => ("push-ups", "Push-ups"),
        Lunges => ("lunges", "Lunges"),
        Planks => ("planks", "Planks"),
        Burpees => ("burpees", "Burpees"),
        PullUps => ("pull-ups", "Pull-ups"),
        Running => ("running", "Running"),
    }
}

choice_enum! {
    Preference {
        Like => ("like", "Like"),
        Neutral => ("neutral", "Neutral"),
        Dislike => ("dislike", "Dislike"),
    }
}

choice_enum! {
    Activity {
        None => ("none", "None of these"),
        Walking => ("walking", "Walking"),
        Running => ("running", "Running"),
        Cycling => ("cycling", "Cycling"),
        Swimming => ("swimming", "Swimming"),
        Yoga => ("yoga", "Yoga"),
        TeamSports => ("team-sports", "Team sports"),
        Dancing => ("dancing", "Dancing"),
    }
}

choice_enum! {
    HealthConcern {
        None => ("none", "None"),
        BackPain => ("back-pain", "Back pain"),
        JointPain => ("joint-pain", "Joint pain"),
        HeartCondition => ("heart-condition", "Heart condition"),
        Diabetes => ("diabetes", "Diabetes"),
        HighBloodPressure => ("high-blood-pressure", "High blood pressure"),
        Asthma => ("asthma", "Asthma"),
    }
}

choice_enum! {
    Allergy {
        None => ("none", "No allergies"),
        Gluten => ("gluten", "Gluten"),
        Lactose => ("lactose", "Lactose"),
        Nuts => ("nuts", "Nuts"),
        Shellfish => ("shellfish", "Shellfish"),
        Eggs => ("eggs", "Eggs"),
        Soy => ("soy", "Soy"),
    }
}

choice_enum! {
    DietFood {
        Chicken => ("chicken", "Chicken"),
        Beef => ("beef", "Beef"),
        Fish => ("fish", "Fish"),
        Eggs => ("eggs", "Eggs"),
        Rice => ("rice", "Rice"),
        Pasta => ("pasta", "Pasta"),
        Vegetables => ("vegetables", "Vegetables"),
        Fruits => ("fruits", "Fruits"),
        Legumes => ("legumes", "Beans and legumes"),
        Dairy => ("dairy", "Dairy"),
    }
}

choice_enum! {
    SugaryFoodFrequency {
        Rarely => ("rarely", "Rarely"),
        FewTimesWeek => ("few-times-week", "A few times a week"),
        Daily => ("daily", "Every day"),
        SeveralTimesDaily => ("several-times-daily", "Several times a day"),
    }
}

choice_enum! {
    SleepHours {
        UnderFive => ("<5", "Less than 5 hours"),
        FiveToSix => ("5-6", "5-6 hours"),
        SevenToEight => ("7-8", "7-8 hours"),
        OverEight => ("8+", "More than 8 hours"),
    }
}
