// tests/integration_tests.rs
// End-to-end tests: text in, samples out, through in-memory devices

use anyhow::Result;
use denbun::{
    AudioSink, MorseError, MorseToken, MorseTransmitter, OutputDevice, Player, SinkError,
    SymbolTable, ToneConfig, ToneSet, render,
};
use rustfft::{FftPlanner, num_complex::Complex};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug)]
struct TestCase {
    name: &'static str,
    text: &'static str,
    code: &'static str,
}

const TEST_CASES: &[TestCase] = &[
    TestCase {
        name: "simple_sos",
        text: "SOS",
        code: "...---...",
    },
    TestCase {
        name: "lower_case",
        text: "sos",
        code: "...---...",
    },
    TestCase {
        name: "words",
        text: "CQ DE JA1",
        code: "-.-.--.- -... .---.-.----",
    },
    TestCase {
        name: "single_space",
        text: " ",
        code: " ",
    },
    TestCase {
        name: "empty",
        text: "",
        code: "",
    },
    TestCase {
        name: "unsupported_only",
        text: "#*~",
        code: "   ",
    },
    TestCase {
        name: "mixed_script",
        text: "でんぶん\u{3000}テスト わゐウヱｦ abc\u{3000}ｉｒｏｈａ",
        code: ".-.--...-.-.--.....-.-. .-.-----.-..-.. -.-.-..-..-.--...--- .--...-.-. ...-.---.....-",
    },
];

#[derive(Default)]
struct Recording {
    opened: usize,
    closed: usize,
    writes: Vec<Vec<f32>>,
    fail_after: Option<usize>,
    refuse_open: bool,
}

struct MemorySink(Rc<RefCell<Recording>>);

impl AudioSink for MemorySink {
    fn write(&mut self, samples: &[f32]) -> Result<(), SinkError> {
        let mut rec = self.0.borrow_mut();
        if rec.fail_after == Some(rec.writes.len()) {
            return Err(SinkError::Write("device disconnected".to_string()));
        }
        rec.writes.push(samples.to_vec());
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.0.borrow_mut().closed += 1;
        Ok(())
    }
}

struct MemoryDevice(Rc<RefCell<Recording>>);

impl OutputDevice for MemoryDevice {
    type Sink = MemorySink;

    fn open(&mut self) -> Result<MemorySink, SinkError> {
        let mut rec = self.0.borrow_mut();
        if rec.refuse_open {
            return Err(SinkError::NoDevice);
        }
        rec.opened += 1;
        Ok(MemorySink(Rc::clone(&self.0)))
    }
}

fn memory_transmitter(
    recording: Recording,
) -> Result<(MorseTransmitter<MemoryDevice>, Rc<RefCell<Recording>>)> {
    let recording = Rc::new(RefCell::new(recording));
    let transmitter =
        MorseTransmitter::with_device(ToneConfig::default(), MemoryDevice(Rc::clone(&recording)))?;
    Ok((transmitter, recording))
}

#[test]
fn run_translation_cases() -> Result<()> {
    let (transmitter, _) = memory_transmitter(Recording::default())?;

    for case in TEST_CASES {
        let tokens = transmitter.translate(case.text);
        assert_eq!(render(&tokens), case.code, "case {}", case.name);
    }
    Ok(())
}

#[test]
fn transmit_writes_expected_buffers() -> Result<()> {
    env_logger::try_init().ok();
    let (mut transmitter, recording) = memory_transmitter(Recording::default())?;

    for case in TEST_CASES {
        recording.borrow_mut().writes.clear();
        transmitter.transmit(case.text)?;

        let tones = transmitter.tones();
        let tokens = transmitter.translate(case.text);
        let rec = recording.borrow();
        assert_eq!(rec.writes.len(), 2 * tokens.len(), "case {}", case.name);

        for (token, pair) in tokens.iter().zip(rec.writes.chunks(2)) {
            let expected = match token {
                MorseToken::Dot => tones.short_tone(),
                MorseToken::Dash => tones.long_tone(),
                MorseToken::Gap => tones.silence(),
            };
            assert_eq!(pair[0], expected, "case {}", case.name);
            assert_eq!(pair[1], tones.silence(), "case {}", case.name);
        }
    }

    // One stream served every transmission.
    assert_eq!(recording.borrow().opened, 1);
    Ok(())
}

#[test]
fn sos_playback_length() -> Result<()> {
    let (mut transmitter, recording) = memory_transmitter(Recording::default())?;
    transmitter.transmit("SOS")?;

    let total: usize = recording.borrow().writes.iter().map(Vec::len).sum();
    // 6 dits, 3 dahs, 9 trailing silences; dit = 1455 samples.
    let dit = 1455;
    assert_eq!(total, 6 * dit + 3 * 3 * dit + 9 * 2 * dit);

    let tokens = transmitter.translate("SOS");
    let player = Player::new(transmitter.tones());
    assert_eq!(player.samples_for(&tokens), total);
    Ok(())
}

#[test]
fn lifecycle_is_idempotent() -> Result<()> {
    let (mut transmitter, recording) = memory_transmitter(Recording::default())?;
    assert!(!transmitter.is_open());

    transmitter.close()?;
    transmitter.open()?;
    transmitter.open()?;
    assert!(transmitter.is_open());
    assert_eq!(recording.borrow().opened, 1);

    transmitter.close()?;
    transmitter.close()?;
    assert!(!transmitter.is_open());
    assert_eq!(recording.borrow().closed, 1);

    // Playing after close reopens a fresh stream.
    transmitter.play([MorseToken::Dot])?;
    assert_eq!(recording.borrow().opened, 2);

    drop(transmitter);
    assert_eq!(recording.borrow().closed, 2);
    Ok(())
}

#[test]
fn write_failure_is_reported() -> Result<()> {
    let (mut transmitter, recording) = memory_transmitter(Recording {
        fail_after: Some(5),
        ..Default::default()
    })?;

    let err = transmitter.transmit("SOS").unwrap_err();
    assert!(matches!(err, MorseError::Sink(SinkError::Write(_))), "{err}");
    assert_eq!(recording.borrow().writes.len(), 5);
    Ok(())
}

#[test]
fn missing_device_is_reported() -> Result<()> {
    let (mut transmitter, _) = memory_transmitter(Recording {
        refuse_open: true,
        ..Default::default()
    })?;

    let err = transmitter.transmit("E").unwrap_err();
    assert!(matches!(err, MorseError::Sink(SinkError::NoDevice)), "{err}");
    assert!(!transmitter.is_open());
    Ok(())
}

#[test]
fn invalid_config_never_touches_device() {
    let recording = Rc::new(RefCell::new(Recording::default()));
    let result = MorseTransmitter::with_device(
        ToneConfig::new(44100, 0.033, 0.0),
        MemoryDevice(Rc::clone(&recording)),
    );
    assert!(matches!(
        result,
        Err(MorseError::InvalidParameter {
            name: "frequency",
            ..
        })
    ));
    assert_eq!(recording.borrow().opened, 0);
}

#[test]
fn custom_table_replaces_builtin() -> Result<()> {
    let (transmitter, _) = memory_transmitter(Recording::default())?;
    let transmitter = transmitter.with_table(SymbolTable::parse("A -\nB .")?);

    assert_eq!(render(&transmitter.translate("ab c")), "-.  ");
    Ok(())
}

#[test]
fn tone_spectrum_peaks_at_frequency() -> Result<()> {
    for &frequency in &[440.0, 880.0, 1200.0] {
        let config = ToneConfig::new(44100, 0.1, frequency);
        let tones = ToneSet::synthesize(config)?;

        let fft_size = 4096;
        let mut buffer: Vec<Complex<f32>> = tones.long_tone()[..fft_size]
            .iter()
            .map(|&s| Complex::new(s, 0.0))
            .collect();
        FftPlanner::new()
            .plan_fft_forward(fft_size)
            .process(&mut buffer);

        let df = config.sample_rate as f64 / fft_size as f64;
        let peak = buffer
            .iter()
            .take(fft_size / 2)
            .enumerate()
            .fold((0, 0.0f32), |(max_i, max_p), (i, v)| {
                if v.norm_sqr() > max_p {
                    (i, v.norm_sqr())
                } else {
                    (max_i, max_p)
                }
            })
            .0;

        let peak_hz = peak as f64 * df;
        assert!(
            (peak_hz - frequency).abs() <= df,
            "peak at {peak_hz:.1} Hz for a {frequency} Hz tone"
        );
    }
    Ok(())
}
