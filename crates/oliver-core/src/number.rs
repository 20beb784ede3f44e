use std::fmt;

/// A complex number over extended reals. Pure reals are the common case;
/// the imaginary component stays zero until a complex literal or a complex
/// power produces one. NaN in either component marks the undefined number.
#[derive(Debug, Clone, Copy)]
pub struct Number {
    re: f64,
    im: f64,
}

impl Number {
    pub fn real(re: f64) -> Number {
        Number { re, im: 0.0 }
    }

    pub fn complex(re: f64, im: f64) -> Number {
        Number { re, im }
    }

    pub fn nan() -> Number {
        Number {
            re: f64::NAN,
            im: f64::NAN,
        }
    }

    /// Parse the text between number quotes. Accepts `nan`, `inf`, `+inf`,
    /// `-inf`, a real with optional exponent, and complex forms written
    /// either `re,im` or with a trailing `i`/`j` on the imaginary part.
    /// Malformed components read as NaN.
    pub fn parse(text: &str) -> Number {
        let text = text.trim().to_ascii_lowercase();

        if text.is_empty() {
            return Number::real(0.0);
        }
        match text.as_str() {
            "nan" => return Number::nan(),
            "inf" | "+inf" => return Number::real(f64::INFINITY),
            "-inf" => return Number::real(f64::NEG_INFINITY),
            _ => {}
        }

        let parts: Vec<&str> = text
            .split([',', ' '])
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        let mut re = 0.0;
        let mut im = 0.0;

        match parts.as_slice() {
            [single] => {
                if let Some(imag) = single.strip_suffix(['i', 'j']) {
                    im = parse_component(imag);
                } else {
                    re = parse_component(single);
                }
            }
            [first, second] => {
                re = parse_component(first);
                im = parse_component(second.strip_suffix(['i', 'j']).unwrap_or(second));
            }
            _ => return Number::nan(),
        }

        Number { re, im }
    }

    pub fn re(&self) -> f64 {
        self.re
    }

    pub fn im(&self) -> f64 {
        self.im
    }

    pub fn is_nan(&self) -> bool {
        self.re.is_nan() || self.im.is_nan()
    }

    pub fn is_complex(&self) -> bool {
        self.im != 0.0
    }

    /// Truthy iff defined and non-zero in either component.
    pub fn is_true(&self) -> bool {
        !self.is_nan() && (self.re != 0.0 || self.im != 0.0)
    }

    /// Sign comparison over the reals; NaN when either side is undefined or
    /// complex, where no meaningful order exists.
    pub fn compare(&self, other: &Number) -> f64 {
        if self.is_nan() || other.is_nan() || self.is_complex() || other.is_complex() {
            return f64::NAN;
        }
        if self.re > other.re {
            1.0
        } else if self.re < other.re {
            -1.0
        } else {
            0.0
        }
    }

    pub fn neg(&self) -> Number {
        Number {
            re: -self.re,
            im: -self.im,
        }
    }

    pub fn add(&self, other: &Number) -> Number {
        Number {
            re: self.re + other.re,
            im: self.im + other.im,
        }
    }

    pub fn sub(&self, other: &Number) -> Number {
        Number {
            re: self.re - other.re,
            im: self.im - other.im,
        }
    }

    pub fn mul(&self, other: &Number) -> Number {
        Number {
            re: self.re * other.re - self.im * other.im,
            im: self.re * other.im + self.im * other.re,
        }
    }

    pub fn div(&self, other: &Number) -> Number {
        let denom = other.re * other.re + other.im * other.im;
        Number {
            re: (self.re * other.re + self.im * other.im) / denom,
            im: (self.im * other.re - self.re * other.im) / denom,
        }
    }

    /// Euclidean integral modulus, defined on non-NaN, non-complex values
    /// with a non-zero divisor.
    pub fn modulo(&self, other: &Number) -> Number {
        if self.is_nan() || other.is_nan() || self.is_complex() || other.is_complex() {
            return Number::nan();
        }
        if other.re == 0.0 {
            return Number::nan();
        }
        Number::real((self.re as i64).rem_euclid(other.re as i64) as f64)
    }

    /// Floored real division, defined on non-NaN, non-complex values.
    pub fn floor_div(&self, other: &Number) -> Number {
        if self.is_nan() || other.is_nan() || self.is_complex() || other.is_complex() {
            return Number::nan();
        }
        Number::real((self.re / other.re).floor())
    }

    /// Fractional remainder of the quotient: `q - floor(q)`.
    pub fn rem(&self, other: &Number) -> Number {
        if self.is_nan() || other.is_nan() || self.is_complex() || other.is_complex() {
            return Number::nan();
        }
        let q = self.re / other.re;
        Number::real(q - q.floor())
    }

    /// Exponentiation. Real arguments take the real fast path; a negative
    /// base with a fractional exponent, or any complex argument, goes
    /// through the principal branch of `exp(w ln z)`.
    pub fn pow(&self, other: &Number) -> Number {
        if self.is_nan() || other.is_nan() {
            return Number::nan();
        }
        if !self.is_complex() && !other.is_complex() {
            let real = self.re.powf(other.re);
            if !real.is_nan() {
                return Number::real(real);
            }
        }
        if self.re == 0.0 && self.im == 0.0 {
            return if other.re == 0.0 && other.im == 0.0 {
                Number::real(1.0)
            } else if other.re > 0.0 && !other.is_complex() {
                Number::real(0.0)
            } else {
                Number::nan()
            };
        }
        // w ln z, then back through the exponential.
        let ln_mod = self.re.hypot(self.im).ln();
        let arg = self.im.atan2(self.re);
        let exp_re = other.re * ln_mod - other.im * arg;
        let exp_im = other.re * arg + other.im * ln_mod;
        let scale = exp_re.exp();
        Number {
            re: scale * exp_im.cos(),
            im: scale * exp_im.sin(),
        }
    }

    pub fn l_and(&self, other: &Number) -> bool {
        if self.is_nan() || other.is_nan() || self.is_complex() || other.is_complex() {
            return false;
        }
        self.re != 0.0 && other.re != 0.0
    }

    pub fn l_or(&self, other: &Number) -> bool {
        if self.is_nan() || other.is_nan() || self.is_complex() || other.is_complex() {
            return false;
        }
        self.re != 0.0 || other.re != 0.0
    }

    pub fn l_xor(&self, other: &Number) -> bool {
        if self.is_nan() || other.is_nan() || self.is_complex() || other.is_complex() {
            return false;
        }
        (self.re != 0.0) ^ (other.re != 0.0)
    }

    pub fn l_not(&self) -> bool {
        if self.is_nan() || self.is_complex() {
            return true;
        }
        self.re == 0.0
    }
}

fn parse_component(text: &str) -> f64 {
    if text.is_empty() {
        // A bare `i`/`j` suffix means an imaginary unit of 1.
        return 1.0;
    }
    match text {
        "+" => 1.0,
        "-" => -1.0,
        _ => text.parse().unwrap_or(f64::NAN),
    }
}

/// Integral reals print without a fractional suffix.
fn fmt_real(out: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        write!(out, "nan")
    } else if value.is_infinite() {
        write!(out, "{}", if value > 0.0 { "inf" } else { "-inf" })
    } else if value == value.trunc() && value.abs() < 1e15 {
        write!(out, "{}", value as i64)
    } else {
        write!(out, "{value}")
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nan() {
            return write!(f, "nan");
        }
        if self.im != 0.0 && self.re == 0.0 {
            fmt_real(f, self.im)?;
            return write!(f, "j");
        }
        if self.im == 0.0 {
            return fmt_real(f, self.re);
        }
        write!(f, "(")?;
        fmt_real(f, self.re)?;
        write!(f, ",")?;
        if self.im > 0.0 {
            write!(f, "+")?;
        }
        fmt_real(f, self.im)?;
        write!(f, "j)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_reals_and_specials() {
        assert_eq!(Number::parse("42").re(), 42.0);
        assert_eq!(Number::parse("-2.5").re(), -2.5);
        assert_eq!(Number::parse("1e3").re(), 1000.0);
        assert!(Number::parse("nan").is_nan());
        assert_eq!(Number::parse("inf").re(), f64::INFINITY);
        assert_eq!(Number::parse("-inf").re(), f64::NEG_INFINITY);
        assert_eq!(Number::parse("").re(), 0.0);
    }

    #[test]
    fn parses_complex_forms() {
        let comma = Number::parse("1,2");
        assert_eq!((comma.re(), comma.im()), (1.0, 2.0));
        let suffix = Number::parse("3j");
        assert_eq!((suffix.re(), suffix.im()), (0.0, 3.0));
        let both = Number::parse("1,2i");
        assert_eq!((both.re(), both.im()), (1.0, 2.0));
        let unit = Number::parse("j");
        assert_eq!((unit.re(), unit.im()), (0.0, 1.0));
    }

    #[test]
    fn arithmetic_on_reals() {
        let a = Number::real(3.0);
        let b = Number::real(4.0);
        assert_eq!(a.add(&b).re(), 7.0);
        assert_eq!(a.sub(&b).re(), -1.0);
        assert_eq!(a.mul(&b).re(), 12.0);
        assert_eq!(a.div(&b).re(), 0.75);
        assert_eq!(Number::real(10.0).modulo(&Number::real(3.0)).re(), 1.0);
        assert_eq!(Number::real(7.0).floor_div(&Number::real(2.0)).re(), 3.0);
        assert_eq!(Number::real(7.0).rem(&Number::real(2.0)).re(), 0.5);
    }

    #[test]
    fn complex_multiplication() {
        // (1+2i)(3+4i) = -5 + 10i
        let z = Number::complex(1.0, 2.0).mul(&Number::complex(3.0, 4.0));
        assert_eq!((z.re(), z.im()), (-5.0, 10.0));
    }

    #[test]
    fn pow_takes_the_real_fast_path() {
        assert_eq!(Number::real(2.0).pow(&Number::real(10.0)).re(), 1024.0);
        assert_eq!(Number::real(9.0).pow(&Number::real(0.5)).re(), 3.0);
    }

    #[test]
    fn pow_of_negative_base_goes_complex() {
        // (-1)^0.5 = i (principal branch)
        let z = Number::real(-1.0).pow(&Number::real(0.5));
        assert!(z.re().abs() < 1e-12);
        assert!((z.im() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn comparison_is_nan_for_complex_or_undefined() {
        let a = Number::real(1.0);
        let b = Number::real(2.0);
        assert_eq!(a.compare(&b), -1.0);
        assert_eq!(b.compare(&a), 1.0);
        assert_eq!(a.compare(&a), 0.0);
        assert!(a.compare(&Number::nan()).is_nan());
        assert!(a.compare(&Number::complex(1.0, 1.0)).is_nan());
    }

    #[test]
    fn modulus_of_complex_is_nan() {
        assert!(Number::complex(1.0, 1.0)
            .modulo(&Number::real(2.0))
            .is_nan());
        assert!(Number::real(5.0).modulo(&Number::real(0.0)).is_nan());
    }

    #[test]
    fn display_forms() {
        assert_eq!(Number::real(7.0).to_string(), "7");
        assert_eq!(Number::real(0.25).to_string(), "0.25");
        assert_eq!(Number::complex(0.0, 3.0).to_string(), "3j");
        assert_eq!(Number::complex(1.0, 3.0).to_string(), "(1,+3j)");
        assert_eq!(Number::complex(1.0, -3.0).to_string(), "(1,-3j)");
        assert_eq!(Number::nan().to_string(), "nan");
    }

    #[test]
    fn truthiness() {
        assert!(Number::real(1.0).is_true());
        assert!(Number::complex(0.0, 2.0).is_true());
        assert!(!Number::real(0.0).is_true());
        assert!(!Number::nan().is_true());
    }
}
