/// Spring parameter set. Mass defaults to one; the constructors only ask for
/// the two values that actually get tuned.
#[derive(Debug, Clone, Copy)]
pub struct SpringParams {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl SpringParams {
    pub const fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness,
            damping,
            mass: 1.0,
        }
    }
}

/// Below both thresholds the spring snaps to its target and stops stepping.
const SETTLE_VELOCITY_THRESHOLD: f64 = 0.001;
const SETTLE_DISPLACEMENT_THRESHOLD: f64 = 0.001;

/// Frame deltas above this are subdivided so the integration stays stable.
const MAX_STEP: f64 = 1.0 / 60.0;

/// A damped spring driving one numeric channel toward a target value,
/// integrated with semi-implicit Euler. Retargeting keeps the current value
/// and velocity, so an interrupted transition hands off mid-flight instead
/// of jumping.
#[derive(Debug, Clone)]
pub struct Spring {
    value: f64,
    velocity: f64,
    target: f64,
    params: SpringParams,
    settled: bool,
}

impl Spring {
    pub const fn new(from: f64, to: f64, params: SpringParams) -> Self {
        Self {
            value: from,
            velocity: 0.0,
            target: to,
            params,
            settled: false,
        }
    }

    /// A spring already sitting at its target.
    pub const fn at_rest(value: f64, params: SpringParams) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            params,
            settled: true,
        }
    }

    /// Redirects the spring toward a new target, keeping the in-flight value
    /// and velocity.
    pub fn retarget(&mut self, to: f64) {
        self.target = to;
        self.settled = false;
    }

    /// Redirects the spring and swaps its tuning at the same time, for
    /// gestures whose outbound and return legs feel different.
    pub fn retarget_with(&mut self, to: f64, params: SpringParams) {
        self.params = params;
        self.retarget(to);
    }

    /// Advances the spring by one frame delta and returns the new value.
    pub fn step(&mut self, dt: f64) -> f64 {
        if self.settled {
            return self.value;
        }

        let mut remaining = dt.max(0.0);
        while remaining > 0.0 {
            let h = remaining.min(MAX_STEP);
            let spring_force = self.params.stiffness * (self.target - self.value);
            let damping_force = -self.params.damping * self.velocity;
            self.velocity += (spring_force + damping_force) / self.params.mass * h;
            self.value += self.velocity * h;
            remaining -= h;
        }

        if self.velocity.abs() < SETTLE_VELOCITY_THRESHOLD
            && (self.value - self.target).abs() < SETTLE_DISPLACEMENT_THRESHOLD
        {
            self.value = self.target;
            self.velocity = 0.0;
            self.settled = true;
        }

        self.value
    }

    pub const fn value(&self) -> f64 {
        self.value
    }

    pub const fn target(&self) -> f64 {
        self.target
    }

    pub const fn is_settled(&self) -> bool {
        self.settled
    }
}

#[cfg(test)]
mod tests {
    use super::{Spring, SpringParams};

    const FRAME: f64 = 1.0 / 120.0;

    fn run(spring: &mut Spring, frames: usize) {
        for _ in 0..frames {
            spring.step(FRAME);
        }
    }

    #[test]
    fn spring_converges_and_settles() {
        let mut spring = Spring::new(0.0, 1.0, SpringParams::new(170.0, 16.0));
        run(&mut spring, 2400);

        assert!(spring.is_settled());
        assert!((spring.value() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn critically_damped_spring_does_not_overshoot() {
        // damping = 2 * sqrt(stiffness) for mass 1
        let mut spring = Spring::new(0.0, 1.0, SpringParams::new(100.0, 20.0));
        let mut max_seen = 0.0_f64;
        for _ in 0..2400 {
            max_seen = max_seen.max(spring.step(FRAME));
        }

        assert!(max_seen <= 1.01, "overshot to {max_seen}");
        assert!(spring.is_settled());
    }

    #[test]
    fn underdamped_spring_overshoots_then_returns() {
        let mut spring = Spring::new(0.0, 1.0, SpringParams::new(170.0, 4.0));
        let mut max_seen = 0.0_f64;
        for _ in 0..4800 {
            max_seen = max_seen.max(spring.step(FRAME));
        }

        assert!(max_seen > 1.1, "never overshot, peaked at {max_seen}");
        assert!(spring.is_settled());
    }

    #[test]
    fn retarget_keeps_the_in_flight_value() {
        let mut spring = Spring::new(0.0, 1.0, SpringParams::new(170.0, 16.0));
        run(&mut spring, 12);
        let mid_flight = spring.value();
        assert!(mid_flight > 0.0 && mid_flight < 1.0);

        spring.retarget(0.25);
        assert!((spring.value() - mid_flight).abs() < f64::EPSILON);

        run(&mut spring, 2400);
        assert!((spring.value() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn settled_spring_stays_put() {
        let mut spring = Spring::at_rest(1.0, SpringParams::new(260.0, 20.0));
        run(&mut spring, 60);

        assert!(spring.is_settled());
        assert!((spring.value() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn large_frame_delta_is_subdivided() {
        let mut spring = Spring::new(0.0, 1.0, SpringParams::new(170.0, 16.0));
        // A single huge delta must not explode the integration.
        let value = spring.step(2.0);

        assert!(value.is_finite());
        assert!((-1.0..=2.0).contains(&value));
    }
}
