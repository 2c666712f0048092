//! Property-based invariants for the 256-color palette helpers and the
//! color sequence writers.
//!
//! 1. Cube indices always land in 16..=231.
//! 2. Grayscale indices always land in 232..=255.
//! 3. Exact cube colors map back to their own index.
//! 4. Indexed sequences are `38;5;n` / `48;5;n` for every n.
//! 5. Every sequence starts with CSI and ends with `m`.

use ansikit_codes::color::{
    CUBE_LEVELS, Color, ansi256_to_rgb, bg, cube_index, fg, grayscale_index, rgb_to_256,
};
use ansikit_codes::render;
use proptest::prelude::*;

proptest! {
    #[test]
    fn cube_index_in_range(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        let idx = cube_index(r, g, b);
        prop_assert!((16..=231).contains(&idx), "cube index out of range: {}", idx);
    }
}

proptest! {
    #[test]
    fn grayscale_index_in_range(level in any::<u8>()) {
        let idx = grayscale_index(level);
        prop_assert!(idx >= 232, "grayscale index out of range: {}", idx);
    }
}

proptest! {
    #[test]
    fn exact_cube_colors_round_trip(r in 0usize..6, g in 0usize..6, b in 0usize..6) {
        // Pure grays on the cube diagonal map to the ramp instead.
        prop_assume!(!(r == g && g == b));
        let idx = cube_index(r as u8, g as u8, b as u8);
        let rgb = ansi256_to_rgb(idx);
        prop_assert_eq!(rgb.r, CUBE_LEVELS[r]);
        prop_assert_eq!(rgb.g, CUBE_LEVELS[g]);
        prop_assert_eq!(rgb.b, CUBE_LEVELS[b]);
        prop_assert_eq!(rgb_to_256(rgb.r, rgb.g, rgb.b), idx);
    }
}

proptest! {
    #[test]
    fn indexed_sequences_are_byte_exact(n in any::<u8>()) {
        prop_assert_eq!(render(|w| fg(w, Color::Indexed(n))), format!("\x1b[38;5;{n}m"));
        prop_assert_eq!(render(|w| bg(w, Color::Indexed(n))), format!("\x1b[48;5;{n}m"));
    }
}

proptest! {
    #[test]
    fn rgb_sequences_are_well_formed(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        let seq = render(|w| fg(w, Color::rgb(r, g, b)));
        prop_assert!(seq.starts_with("\x1b["));
        prop_assert!(seq.ends_with('m'));
        prop_assert_eq!(seq, format!("\x1b[38;2;{r};{g};{b}m"));
    }
}
