use crate::error::SpikeGradError;

/// Parameters of the integrate-and-fire model.
///
/// Fields are only reachable through [`IfParams::new`], so a value of this type
/// is always valid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IfParams {
    v_rest: f32,
    v_threshold: f32,
    dt: f32,
}

impl IfParams {
    /// # Errors
    /// `InvalidParameter` if any value is not finite or `dt <= 0`.
    pub fn new(v_rest: f32, v_threshold: f32, dt: f32) -> Result<Self, SpikeGradError> {
        check_finite("v_rest", v_rest)?;
        check_finite("v_threshold", v_threshold)?;
        check_positive("dt", dt)?;
        Ok(IfParams {
            v_rest,
            v_threshold,
            dt,
        })
    }

    /// Rest potential.
    pub fn v_rest(&self) -> f32 {
        self.v_rest
    }

    pub fn v_threshold(&self) -> f32 {
        self.v_threshold
    }

    /// Time step.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// Parameters of the leaky integrate-and-fire model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifParams {
    tau: f32,
    v_rest: f32,
    v_threshold: f32,
    dt: f32,
}

impl LifParams {
    /// # Errors
    /// `InvalidParameter` if any value is not finite, `tau <= 0` or `dt <= 0`.
    pub fn new(tau: f32, v_rest: f32, v_threshold: f32, dt: f32) -> Result<Self, SpikeGradError> {
        check_positive("tau", tau)?;
        check_finite("v_rest", v_rest)?;
        check_finite("v_threshold", v_threshold)?;
        check_positive("dt", dt)?;
        Ok(LifParams {
            tau,
            v_rest,
            v_threshold,
            dt,
        })
    }

    /// Membrane time constant (capacitance * resistance).
    pub fn tau(&self) -> f32 {
        self.tau
    }

    pub fn v_rest(&self) -> f32 {
        self.v_rest
    }

    pub fn v_threshold(&self) -> f32 {
        self.v_threshold
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }
}

fn check_finite(name: &'static str, value: f32) -> Result<(), SpikeGradError> {
    if !value.is_finite() {
        return Err(SpikeGradError::InvalidParameter {
            name,
            value,
            reason: "must be finite",
        });
    }
    Ok(())
}

pub(crate) fn check_positive(name: &'static str, value: f32) -> Result<(), SpikeGradError> {
    check_finite(name, value)?;
    if value <= 0.0 {
        return Err(SpikeGradError::InvalidParameter {
            name,
            value,
            reason: "must be strictly positive",
        });
    }
    Ok(())
}
