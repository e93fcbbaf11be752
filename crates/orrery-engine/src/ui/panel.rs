pub const SPEED_MIN: f32 = 0.1;
pub const SPEED_MAX: f32 = 10.0;
pub const SPEED_DEFAULT: f32 = 1.0;

/// Values the animation step reads every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlState {
    /// Multiplier applied to every rotation increment.
    pub speed: f32,
}

impl Default for ControlState {
    fn default() -> Self {
        Self { speed: SPEED_DEFAULT }
    }
}

/// Descriptor the host uses to build a slider widget.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderSpec {
    pub name: String,
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub value: f32,
}

impl SliderSpec {
    /// The 0.1..=10 speed slider, starting at 1.
    pub fn speed() -> Self {
        Self {
            name: "speed".to_string(),
            min: SPEED_MIN,
            max: SPEED_MAX,
            step: 0.1,
            value: SPEED_DEFAULT,
        }
    }

    /// Pin `value` into `[min, max]`. Infinities land on the ends.
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

impl Default for SliderSpec {
    fn default() -> Self {
        Self::speed()
    }
}

/// Sole writer of `ControlState`. Everything else gets `&ControlState`.
#[derive(Debug, Clone)]
pub struct ControlPanel {
    slider: SliderSpec,
    state: ControlState,
}

impl ControlPanel {
    /// Start at the slider's default, clamped into its own range.
    pub fn new(slider: SliderSpec) -> Self {
        let speed = slider.clamp(slider.value);
        Self {
            slider,
            state: ControlState { speed },
        }
    }

    /// Set speed from user input, clamped into the slider range.
    /// NaN is ignored. Returns the value now in effect.
    pub fn set_speed(&mut self, value: f32) -> f32 {
        if !value.is_nan() {
            self.state.speed = self.slider.clamp(value);
        }
        self.state.speed
    }

    pub fn speed(&self) -> f32 {
        self.state.speed
    }

    /// Read-only view handed to the animation step.
    pub fn state(&self) -> &ControlState {
        &self.state
    }

    /// Slider descriptor reflecting the current value.
    pub fn slider(&self) -> SliderSpec {
        SliderSpec {
            value: self.state.speed,
            ..self.slider.clone()
        }
    }
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new(SliderSpec::speed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_one() {
        let panel = ControlPanel::default();
        assert_eq!(panel.speed(), 1.0);
        assert_eq!(panel.state().speed, 1.0);
    }

    #[test]
    fn set_speed_clamps() {
        let mut panel = ControlPanel::default();
        assert_eq!(panel.set_speed(0.0), SPEED_MIN);
        assert_eq!(panel.set_speed(-5.0), SPEED_MIN);
        assert_eq!(panel.set_speed(50.0), SPEED_MAX);
        assert_eq!(panel.set_speed(3.5), 3.5);
    }

    #[test]
    fn nan_keeps_previous_value() {
        let mut panel = ControlPanel::default();
        panel.set_speed(2.0);
        assert_eq!(panel.set_speed(f32::NAN), 2.0);
        assert_eq!(panel.set_speed(f32::INFINITY), SPEED_MAX);
        assert_eq!(panel.set_speed(f32::NEG_INFINITY), SPEED_MIN);
    }

    #[test]
    fn out_of_range_default_is_clamped() {
        let panel = ControlPanel::new(SliderSpec { value: 42.0, ..SliderSpec::speed() });
        assert_eq!(panel.speed(), SPEED_MAX);
    }

    #[test]
    fn slider_reflects_current_value() {
        let mut panel = ControlPanel::default();
        panel.set_speed(4.0);
        let spec = panel.slider();
        assert_eq!(spec.name, "speed");
        assert_eq!(spec.value, 4.0);
        assert_eq!(spec.min, SPEED_MIN);
        assert_eq!(spec.max, SPEED_MAX);
    }
}
