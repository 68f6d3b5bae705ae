pub trait F32Ext
where
    Self: Sized,
{
    fn sqr(self) -> Self;

    /// `acos` with the argument clamped to `[-1.0, 1.0]`, so that
    /// floating-point overshoot on unit-vector dots cannot escape the
    /// function's domain.
    fn acos_clamped(self) -> Self;
}

impl F32Ext for f32 {
    fn sqr(self) -> Self {
        self * self
    }

    fn acos_clamped(self) -> Self {
        self.clamp(-1.0, 1.0).acos()
    }
}
