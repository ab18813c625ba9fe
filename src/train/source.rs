/// Supplies one `(input, target)` example per training epoch.
pub trait TrainingSource {
    fn sample(&mut self) -> (Vec<f64>, Vec<f64>);
}

impl<F> TrainingSource for F
where
    F: FnMut() -> (Vec<f64>, Vec<f64>),
{
    fn sample(&mut self) -> (Vec<f64>, Vec<f64>) {
        self()
    }
}

/// Yields the same example every epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedExample {
    pub input: Vec<f64>,
    pub target: Vec<f64>,
}

impl FixedExample {
    pub fn new(input: Vec<f64>, target: Vec<f64>) -> Self {
        FixedExample { input, target }
    }
}

impl TrainingSource for FixedExample {
    fn sample(&mut self) -> (Vec<f64>, Vec<f64>) {
        (self.input.clone(), self.target.clone())
    }
}
