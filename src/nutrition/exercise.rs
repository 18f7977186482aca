use serde::Serialize;

/// Activities we estimate burn time for, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exercise {
    Jog,
    PowerYoga,
    BriskWalk,
    GymWorkout,
    Cycling,
    Cardio,
}

impl Exercise {
    pub const ALL: [Exercise; 6] = [
        Exercise::Jog,
        Exercise::PowerYoga,
        Exercise::BriskWalk,
        Exercise::GymWorkout,
        Exercise::Cycling,
        Exercise::Cardio,
    ];

    /// Calories burned per minute.
    pub fn rate(self) -> f64 {
        match self {
            Exercise::Jog => 10.0,
            Exercise::PowerYoga => 8.0,
            Exercise::BriskWalk => 5.0,
            Exercise::GymWorkout => 7.0,
            Exercise::Cycling => 12.0,
            Exercise::Cardio => 9.0,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Exercise::Jog => "jog",
            Exercise::PowerYoga => "powerYoga",
            Exercise::BriskWalk => "briskWalk",
            Exercise::GymWorkout => "gymWorkout",
            Exercise::Cycling => "cycling",
            Exercise::Cardio => "cardio",
        }
    }

    pub fn phrase(self) -> &'static str {
        match self {
            Exercise::Jog => "Jog",
            Exercise::PowerYoga => "Do Power Yoga",
            Exercise::BriskWalk => "Brisk walk",
            Exercise::GymWorkout => "Lift weights",
            Exercise::Cycling => "Cycle",
            Exercise::Cardio => "Do Cardio",
        }
    }
}

/// Minutes of each exercise needed to burn a given number of calories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDurations {
    pub jog: u32,
    pub power_yoga: u32,
    pub brisk_walk: u32,
    pub gym_workout: u32,
    pub cycling: u32,
    pub cardio: u32,
}

impl ExerciseDurations {
    pub fn minutes(&self, exercise: Exercise) -> u32 {
        match exercise {
            Exercise::Jog => self.jog,
            Exercise::PowerYoga => self.power_yoga,
            Exercise::BriskWalk => self.brisk_walk,
            Exercise::GymWorkout => self.gym_workout,
            Exercise::Cycling => self.cycling,
            Exercise::Cardio => self.cardio,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Exercise, u32)> + '_ {
        Exercise::ALL.into_iter().map(move |e| (e, self.minutes(e)))
    }
}

/// Returns `None` when `calories` is negative, NaN or infinite, or so large
/// that some duration does not fit in a `u32`.
pub fn compute(calories: f64) -> Option<ExerciseDurations> {
    if !calories.is_finite() || calories < 0.0 {
        return None;
    }
    // f64::round rounds half away from zero.
    let minutes = |e: Exercise| {
        let m = (calories / e.rate()).round();
        (m <= u32::MAX as f64).then_some(m as u32)
    };
    Some(ExerciseDurations {
        jog: minutes(Exercise::Jog)?,
        power_yoga: minutes(Exercise::PowerYoga)?,
        brisk_walk: minutes(Exercise::BriskWalk)?,
        gym_workout: minutes(Exercise::GymWorkout)?,
        cycling: minutes(Exercise::Cycling)?,
        cardio: minutes(Exercise::Cardio)?,
    })
}
