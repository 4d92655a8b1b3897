#![no_main]

use imgload::{CodecRegistry, ImageLoader, Limits};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_pixels: Some(4096 * 4096),
        max_memory_bytes: Some(256 * 1024 * 1024),
        ..Default::default()
    };
    let loader = ImageLoader::with_registry(CodecRegistry::all_with_limits(&limits));

    if let Some(image) = loader.load_from_bytes(data) {
        assert_eq!(image.width(), image.info.width);
        assert_eq!(image.height(), image.info.height);
    }
});
