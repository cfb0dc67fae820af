pub fn dot(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn norm_squared(a: &[f64; 3]) -> f64 {
    dot(a, a)
}

pub fn is_finite(a: &[f64; 3]) -> bool {
    a.iter().all(|x| x.is_finite())
}
