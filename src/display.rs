/// Weather display observer.
///
/// Renders every reading it receives and never raises an alert.

use crate::model::{Reading, StationError};
use crate::observer::Observer;
use crate::outlet::Outlet;

#[derive(Debug, Clone, Default)]
pub struct WeatherDisplay;

impl WeatherDisplay {
    pub const NAME: &'static str = "WeatherDisplay";

    pub fn new() -> Self {
        Self
    }
}

impl Observer for WeatherDisplay {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn update(&mut self, reading: &Reading, outlet: &mut dyn Outlet) -> Result<(), StationError> {
        outlet.render(Self::NAME, reading)
    }
}
