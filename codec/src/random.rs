//! Randomized presets and settings.

use rand::seq::SliceRandom;
use rand::Rng;
use schema::{PackedField, SixBitColor, SIX_BIT_COLORS};

use crate::preset::{Digits, Hand, MaterialStyle, Palette, Pips, Preset, SecondHand};
use crate::settings::Settings;

/// Draws from the field's weighted pool.
fn pick<T: PackedField, R: Rng + ?Sized>(rng: &mut R) -> T {
    T::WEIGHTED.choose(rng).copied().unwrap_or_default()
}

fn color<R: Rng + ?Sized>(rng: &mut R) -> SixBitColor {
    rng.gen_range(0..SIX_BIT_COLORS)
}

fn hand<R: Rng + ?Sized>(rng: &mut R) -> Hand {
    Hand {
        shape: pick(rng),
        length: pick(rng),
        thickness: pick(rng),
        stalk: pick(rng),
        cutout: pick(rng),
        material: pick(rng),
    }
}

fn pips<R: Rng + ?Sized>(rng: &mut R) -> Pips {
    Pips {
        shape: pick(rng),
        size: pick(rng),
        material: pick(rng),
    }
}

impl Preset {
    /// A preset with every field drawn from its weighted pool and every
    /// colour drawn uniformly.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut styles = [MaterialStyle::default(); 4];
        for style in &mut styles {
            style.gradient = pick(rng);
            style.texture = pick(rng);
        }
        Self {
            hour_hand: hand(rng),
            minute_hand_override: rng.gen(),
            minute_hand: hand(rng),
            second_hand_override: rng.gen(),
            second_hand: SecondHand {
                length: pick(rng),
                thickness: pick(rng),
                material: pick(rng),
            },
            digits: Digits {
                material: pick(rng),
                display: pick(rng),
                size: pick(rng),
                rotation: pick(rng),
                format: pick(rng),
            },
            pips_display: pick(rng),
            pip_margin: pick(rng),
            pip_background_material: pick(rng),
            four_pips: pips(rng),
            twelve_pips_override: rng.gen(),
            twelve_pips: pips(rng),
            sixty_pips_override: rng.gen(),
            sixty_pips: pips(rng),
            styles,
            palette: Palette {
                fill: color(rng),
                highlight: color(rng),
                accent: color(rng),
                base: color(rng),
            },
        }
    }
}

impl Settings {
    /// Settings with every field drawn at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            show_unread_notifications: rng.gen(),
            night_vision: rng.gen(),
            complication_count: pick(rng),
            complication_rotation: pick(rng),
            complication_size: pick(rng),
            complication_scale: pick(rng),
            typeface: pick(rng),
            ambient_day_color: color(rng),
            ambient_night_color: color(rng),
            complication_text_style: pick(rng),
        }
    }
}
