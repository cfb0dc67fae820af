/// kT from the equipartition theorem; zero without degrees of freedom
pub fn from_kinetic(kinetic_energy: f64, ndof: usize) -> f64 {
    if ndof == 0 {
        0.0
    } else {
        2.0 * kinetic_energy / ndof as f64
    }
}
