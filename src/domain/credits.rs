use core::fmt;
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Количество игровой валюты. Обёртка над f64, чтобы не путать с обычными числами.
///
/// В отличие от фишек за столом, баланс может уйти в минус:
/// защиты от овердрафта в кошельке нет, проверку делают сами игры.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(transparent)]
pub struct Credits(pub f64);

impl Credits {
    pub const ZERO: Credits = Credits(0.0);

    pub fn new(amount: f64) -> Self {
        Credits(amount)
    }

    pub fn amount(self) -> f64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0.0
    }

    pub fn abs(self) -> Credits {
        Credits(self.0.abs())
    }
}

impl From<f64> for Credits {
    fn from(v: f64) -> Self {
        Credits(v)
    }
}

impl fmt::Display for Credits {
    /// Формат `$12.50`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl Add for Credits {
    type Output = Credits;

    fn add(self, rhs: Credits) -> Self::Output {
        Credits(self.0 + rhs.0)
    }
}

impl AddAssign for Credits {
    fn add_assign(&mut self, rhs: Credits) {
        self.0 += rhs.0;
    }
}

impl Sub for Credits {
    type Output = Credits;

    fn sub(self, rhs: Credits) -> Self::Output {
        Credits(self.0 - rhs.0)
    }
}

impl SubAssign for Credits {
    fn sub_assign(&mut self, rhs: Credits) {
        self.0 -= rhs.0;
    }
}

impl Mul<f64> for Credits {
    type Output = Credits;

    fn mul(self, rhs: f64) -> Self::Output {
        Credits(self.0 * rhs)
    }
}

impl Neg for Credits {
    type Output = Credits;

    fn neg(self) -> Self::Output {
        Credits(-self.0)
    }
}
