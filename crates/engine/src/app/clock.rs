/// Length of one simulated day in seconds of game time.
pub const DAY_LENGTH_SECONDS: f32 = 600.0;

/// Clock fraction the world starts at (08:00).
const START_FRACTION: f32 = 8.0 / 24.0;

const DAWN_START: f32 = 0.25;
const DAWN_END: f32 = 0.33;
const DUSK_START: f32 = 0.75;
const DUSK_END: f32 = 0.83;

const NIGHT_COLOR: [f32; 3] = [0.35, 0.38, 0.55];
const DAY_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

/// Ambient day/night clock. Advanced once per simulation tick with the
/// frame's elapsed time; queried for the tint applied to world rendering and
/// for the HUD clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct DayCycle {
    elapsed_seconds: f32,
}

impl DayCycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, dt_seconds: f32) {
        self.elapsed_seconds += dt_seconds.max(0.0);
    }

    /// Seconds the world has been running.
    pub fn time(&self) -> f32 {
        self.elapsed_seconds
    }

    /// Seconds into the current day; day 0 begins at midnight, the world
    /// starts at 08:00.
    pub fn time_of_day(&self) -> f32 {
        self.wall_seconds() % DAY_LENGTH_SECONDS
    }

    /// Completed plus current day count, starting at 0; increments at
    /// midnight.
    pub fn days(&self) -> u32 {
        (self.wall_seconds() / DAY_LENGTH_SECONDS) as u32
    }

    /// Fraction of the current day in [0, 1), 0 at midnight.
    pub fn day_fraction(&self) -> f32 {
        self.time_of_day() / DAY_LENGTH_SECONDS
    }

    /// Daylight intensity in [0, 1]: 0 at night, 1 in full day, linear ramps
    /// through dawn and dusk.
    pub fn daylight(&self) -> f32 {
        let fraction = self.day_fraction();
        if fraction < DAWN_START || fraction >= DUSK_END {
            0.0
        } else if fraction < DAWN_END {
            (fraction - DAWN_START) / (DAWN_END - DAWN_START)
        } else if fraction < DUSK_START {
            1.0
        } else {
            1.0 - (fraction - DUSK_START) / (DUSK_END - DUSK_START)
        }
    }

    /// RGB multiplier applied to world draws for ambient lighting.
    pub fn current_color(&self) -> [f32; 3] {
        let daylight = self.daylight();
        [
            lerp(NIGHT_COLOR[0], DAY_COLOR[0], daylight),
            lerp(NIGHT_COLOR[1], DAY_COLOR[1], daylight),
            lerp(NIGHT_COLOR[2], DAY_COLOR[2], daylight),
        ]
    }

    /// 24-hour clock text for the HUD.
    pub fn formatted_time(&self) -> String {
        let minutes_of_day = (self.day_fraction() * 24.0 * 60.0) as u32;
        format!("{:02}:{:02}", minutes_of_day / 60, minutes_of_day % 60)
    }

    fn wall_seconds(&self) -> f32 {
        START_FRACTION * DAY_LENGTH_SECONDS + self.elapsed_seconds
    }
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle_at_fraction(fraction: f32) -> DayCycle {
        let mut cycle = DayCycle::new();
        // Forward to midnight, then to the requested clock fraction; the
        // small overshoot keeps float error from landing a hair early.
        cycle.advance((1.0 - START_FRACTION + fraction) * DAY_LENGTH_SECONDS + 0.001);
        cycle
    }

    #[test]
    fn starts_at_eight_in_the_morning() {
        let cycle = DayCycle::new();
        assert_eq!(cycle.formatted_time(), "08:00");
        assert_eq!(cycle.days(), 0);
        assert_eq!(cycle.time(), 0.0);
    }

    #[test]
    fn noon_is_full_daylight_with_white_tint() {
        let cycle = cycle_at_fraction(0.5);
        assert!((cycle.daylight() - 1.0).abs() < 0.0001);
        let color = cycle.current_color();
        for channel in 0..3 {
            assert!((color[channel] - DAY_COLOR[channel]).abs() < 0.0001);
        }
        assert_eq!(cycle.formatted_time(), "12:00");
    }

    #[test]
    fn midnight_is_dark() {
        let cycle = cycle_at_fraction(0.0);
        assert_eq!(cycle.daylight(), 0.0);
        assert_eq!(cycle.current_color(), NIGHT_COLOR);
    }

    #[test]
    fn dawn_ramps_between_night_and_day() {
        let cycle = cycle_at_fraction((DAWN_START + DAWN_END) / 2.0);
        let daylight = cycle.daylight();
        assert!(daylight > 0.4 && daylight < 0.6, "daylight={daylight}");
    }

    #[test]
    fn day_count_increments_at_midnight() {
        let mut cycle = DayCycle::new();
        assert_eq!(cycle.days(), 0);
        cycle.advance((1.0 - START_FRACTION) * DAY_LENGTH_SECONDS + 1.0);
        assert_eq!(cycle.days(), 1);
        cycle.advance(DAY_LENGTH_SECONDS);
        assert_eq!(cycle.days(), 2);
    }

    #[test]
    fn time_of_day_wraps_within_a_day() {
        let mut cycle = DayCycle::new();
        cycle.advance(DAY_LENGTH_SECONDS * 3.0);
        assert!(cycle.time_of_day() < DAY_LENGTH_SECONDS);
        assert_eq!(cycle.formatted_time(), "08:00");
    }

    #[test]
    fn negative_advance_is_ignored() {
        let mut cycle = DayCycle::new();
        cycle.advance(-5.0);
        assert_eq!(cycle.time(), 0.0);
    }
}
