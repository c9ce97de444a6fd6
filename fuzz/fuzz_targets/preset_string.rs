#![no_main]

use codec::{FaceState, PackedModel, Preset, Settings, Transport};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let transport = Transport::default();

    if let Ok(preset) = Preset::from_display_string(s, &transport) {
        // Any accepted string re-encodes to a current layout that decodes to the same preset.
        let again = Preset::from_display_string(&preset.to_display_string(&transport), &transport);
        assert_eq!(again.ok(), Some(preset));
    }
    if let Ok(preset) = Preset::from_fast_string(s) {
        assert_eq!(Preset::unpack(preset.to_bytes()).ok(), Some(preset));
    }
    let _ = Settings::from_fast_string(s);
    let _ = FaceState::parse(s, &transport);
});
