/// Evenly spaced samples over a closed interval, the way `numpy.linspace` lays them out.
pub(crate) struct Linspace {
    start: f64,
    end: f64,
    step: f64,
    index: usize,
    len: usize,
}

impl Linspace {
    pub(crate) fn new(min: f64, max: f64, n: usize) -> Self {
        let step = if n > 1 {
            let num_steps = (n - 1) as f64;
            (max - min) / num_steps
        } else {
            0.
        };

        Linspace {
            start: min,
            end: max,
            step,
            index: 0,
            len: n,
        }
    }
}

impl Iterator for Linspace {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        if self.index >= self.len {
            return None;
        }

        let i = self.index;
        self.index += 1;

        // numpy pins the last sample to the end point instead of accumulating error
        if i + 1 == self.len && i > 0 {
            return Some(self.end);
        }

        Some(self.start + self.step * i as f64)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Linspace {}

#[test]
fn test_linspace() {
    let points: Vec<_> = Linspace::new(0., 2., 3).collect();

    assert_eq!(points, vec![0., 1., 2.]);

    let points: Vec<_> = Linspace::new(0.8, 2.0, 13).collect();

    assert_eq!(points.len(), 13);
    assert!((points[1] - 0.9).abs() < 1e-12);
    assert_eq!(points[12], 2.0);

    assert_eq!(Linspace::new(5., 5., 1).collect::<Vec<_>>(), vec![5.]);
    assert_eq!(Linspace::new(0., 1., 0).count(), 0);
}
