/// Real roots of `a·t² + b·t + c = 0`.
///
/// A repeated root collapses to [`Roots::One`]. Two distinct roots are kept in
/// the order they were computed; callers sort when they need to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Roots {
    None,
    One(f64),
    Two(f64, f64),
}

impl Roots {
    pub fn iter(&self) -> impl Iterator<Item = f64> {
        let (first, second) = match *self {
            Roots::None => (None, None),
            Roots::One(r) => (Some(r), None),
            Roots::Two(r1, r2) => (Some(r1), Some(r2)),
        };
        first.into_iter().chain(second)
    }

    pub fn len(&self) -> usize {
        match self {
            Roots::None => 0,
            Roots::One(_) => 1,
            Roots::Two(..) => 2,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Roots::None)
    }

    fn from_candidates(candidates: [f64; 2], count: usize) -> Self {
        let mut kept = candidates
            .iter()
            .copied()
            .take(count)
            .filter(|t| t.is_finite());
        match (kept.next(), kept.next()) {
            (None, _) => Roots::None,
            (Some(r), None) => Roots::One(r),
            (Some(r1), Some(r2)) => Roots::Two(r1, r2),
        }
    }
}

/// Solves `a·t² + b·t + c = 0` over the reals.
///
/// `a = 0, b = 0` has no solutions even when `c = 0`: the callers only feed
/// motion deltas here, where a constant polynomial means "never changes".
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Roots {
    let mut candidates = [f64::NAN; 2];
    let count;

    if a == 0.0 {
        if b == 0.0 {
            return Roots::None;
        }
        candidates[0] = -c / b;
        count = 1;
    } else {
        let disc = b * b - 4.0 * a * c;
        if disc.is_nan() || disc < 0.0 {
            return Roots::None;
        }
        if disc == 0.0 {
            candidates[0] = -b / (2.0 * a);
            count = 1;
        } else {
            let sqrt_disc = disc.sqrt();
            candidates[0] = (-b - sqrt_disc) / (2.0 * a);
            candidates[1] = (-b + sqrt_disc) / (2.0 * a);
            count = 2;
        }
    }

    Roots::from_candidates(candidates, count)
}

/// Second-order polynomial in one variable, kept around so the derived
/// root queries read naturally at call sites.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quadratic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Quadratic {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    pub fn real_roots(&self) -> Roots {
        solve_quadratic(self.a, self.b, self.c)
    }

    /// Strictly positive roots, in solver order.
    pub fn positive_roots(&self) -> impl Iterator<Item = f64> {
        self.real_roots().iter().filter(|t| *t > 0.0)
    }

    pub fn smallest_positive_root(&self) -> Option<f64> {
        self.positive_roots().reduce(f64::min)
    }

    pub fn eval(&self, t: f64) -> f64 {
        (self.a * t + self.b) * t + self.c
    }
}

impl std::fmt::Display for Quadratic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:+}t^2{:+}t{:+}", self.a, self.b, self.c)
    }
}
