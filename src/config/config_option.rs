/// A configurable value, bounded by some minimum and maximum.
///
/// The bounds are not enforced by the option itself, and are instead checked wherever a value is read from the outside (e.g. the cli).
#[derive(Clone, Debug)]
pub struct ConfigOption<T> {
    pub name: &'static str,
    pub min: T,
    pub max: T,
    pub value: T,
}

impl<T: Clone> ConfigOption<T> {
    pub fn min_max(&self) -> (T, T) {
        (self.min.clone(), self.max.clone())
    }
}

impl<T: Clone + PartialOrd> ConfigOption<T> {
    /// Sets the value of the option to `value`, if `value` is within the bounds of the option.
    ///
    /// Returns whether the value was set.
    pub fn set_within_bounds(&mut self, value: T) -> bool {
        match self.min <= value && value <= self.max {
            true => {
                self.value = value;
                true
            }
            false => false,
        }
    }
}
