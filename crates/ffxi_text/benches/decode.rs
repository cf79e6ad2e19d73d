use divan::AllocProfiler;

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

fn main() {
    divan::main();
}

pub mod decode {
    use divan::Bencher;

    fn ascii() -> Vec<u8> {
        b"The quick brown fox jumps over the lazy dog.\x07".repeat(64)
    }

    fn mixed() -> Vec<u8> {
        #[rustfmt::skip]
        let phrase = [
            0x82, 0xA0, 0x82, 0xA2, 0x82, 0xA4,
            0xFD, 0x02, 0x02, 0x0A, 0x0B, 0xFD,
            0xB1, 0xB2, 0x1F, 0x05, b'!',
        ];
        phrase.repeat(64)
    }

    #[divan::bench]
    fn ascii_text(bencher: Bencher) {
        bencher
            .with_inputs(ascii)
            .bench_refs(|data| divan::black_box(ffxi_text::decode(data)));
    }

    #[divan::bench]
    fn mixed_text(bencher: Bencher) {
        bencher
            .with_inputs(mixed)
            .bench_refs(|data| divan::black_box(ffxi_text::decode(data)));
    }
}
