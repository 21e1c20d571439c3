//! Deterministic heightfield for island relief.
//!
//! Three fixed sine/cosine octaves summed: the low-frequency,
//! high-amplitude term carries the large-scale relief while the
//! higher-frequency terms add local variation. There is no seed and
//! no state, so the same coordinates always sample the same height.

/// (frequency, amplitude) per octave. Amplitudes are summed, not blended.
const OCTAVES: [(f64, f64); 3] = [(0.1, 5.0), (0.05, 10.0), (0.02, 15.0)];

/// Sample the heightfield at lattice coordinates.
///
/// Pure and deterministic; the result lies within the sum of the
/// octave amplitudes.
pub fn height(x: f64, z: f64) -> f64 {
    OCTAVES
        .iter()
        .map(|&(freq, amp)| (x * freq).sin() * (z * freq).cos() * amp)
        .sum()
}
