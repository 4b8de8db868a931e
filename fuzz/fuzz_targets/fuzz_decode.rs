#![no_main]

use libfuzzer_sys::fuzz_target;
use voxcaptcha_dsp::wav;

fuzz_target!(|data: &[u8]| {
    if let Ok(buffer) = wav::decode(data) {
        assert!(buffer.samples().iter().all(|s| (-1.0..1.0).contains(s)));
        let _ = wav::encode_buffer(&buffer);
    }
});
