//! Lag-window kernels for long-run covariance estimation.
//!
//! Each kernel maps the taper argument `x = k/(L+1)` to a weight `w(x)`.
//! Using `L+1` in the denominator keeps `x < 1` at the largest lag, so the
//! Bartlett weight `1 − k/(L+1)` never vanishes inside the window.

/// HAC taper family.
///
/// - `IID`: only the contemporaneous term contributes.
/// - `Bartlett`: triangular Newey–West window `1 − |x|` on `|x| ≤ 1`.
/// - `Parzen`: cubic window with compact support.
/// - `QuadraticSpectral`: Andrews' infinite-support window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KernelType {
    IID,
    #[default]
    Bartlett,
    Parzen,
    QuadraticSpectral,
}

impl KernelType {
    /// Weight `w(x)` at taper argument `x`.
    pub fn weight(&self, x: f64) -> f64 {
        let ax = x.abs();
        match self {
            KernelType::IID => f64::from(u8::from(x == 0.0)),
            KernelType::Bartlett => (1.0 - ax).max(0.0),
            KernelType::Parzen => match ax {
                a if a <= 0.5 => 1.0 - 6.0 * a * a + 6.0 * a * a * a,
                a if a <= 1.0 => 2.0 * (1.0 - a).powi(3),
                _ => 0.0,
            },
            KernelType::QuadraticSpectral => {
                if x == 0.0 {
                    return 1.0;
                }
                let z = 6.0 * std::f64::consts::PI * x / 5.0;
                3.0 / (z * z) * (z.sin() / z - z.cos())
            }
        }
    }

    /// Weight for lag `k` under truncation `L`, i.e. `w(k/(L+1))`.
    pub fn lag_weight(&self, k: usize, bandwidth: usize) -> f64 {
        self.weight(k as f64 / (bandwidth + 1) as f64)
    }
}
