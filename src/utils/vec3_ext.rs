use glam::{vec3, Vec3};

pub trait Vec3Ext
where
    Self: Sized,
{
    /// Component-wise square; used when accumulating per-channel variance.
    fn sqr(self) -> Self;

    /// Component-wise square root.
    fn sqrt(self) -> Self;
}

impl Vec3Ext for Vec3 {
    fn sqr(self) -> Self {
        self * self
    }

    fn sqrt(self) -> Self {
        vec3(self.x.sqrt(), self.y.sqrt(), self.z.sqrt())
    }
}
