use std::env::args;
use std::fs::write;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use png::Encoder;
use png::ColorType::Rgba;
use png::BitDepth::Eight;
use bezier_clock::*;
use rgb::{ComponentBytes, RGBA8};

struct SystemClock {
	offset_minutes: i32,
}

impl TimeSource for SystemClock {
	fn now(&self) -> TimeOfDay {
		let unix_ms = SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.map(|d| d.as_millis() as i64)
			.unwrap_or(0);
		TimeOfDay::from_unix_millis(unix_ms, self.offset_minutes)
	}
}

// usage: to_png <prefix> [offset minutes] [ambient]
fn main() {
	let mut args = args().skip(1);
	let prefix = args.next().unwrap_or_else(|| "clock".into());
	let offset_minutes = args.next().and_then(|o| o.parse().ok()).unwrap_or(0);
	let mode = match args.next().as_deref() {
		Some("ambient") => DisplayMode::Ambient { low_bit: false, burn_in_protection: true },
		_ => DisplayMode::Interactive,
	};
	let png_name = format!("{}.png", &prefix);

	let face = ClockFace::new(ClockConfig::default()).unwrap();
	let clock = SystemClock { offset_minutes };
	face.log_phases(clock.now());

	let (w, h) = (952, 220);
	let mut canvas = vec![RGBA8::default(); w * h];
	let mut mask = vec![0u8; w * h];

	let runs = 10;
	let now = Instant::now();
	for _ in 0..runs {
		let frame = face.tick(&clock, mode).unwrap();
		frame.render::<4>(&mut canvas, &mut mask, w, h, w).unwrap();
	}
	println!("rendered {} times in {}ms.", runs, now.elapsed().as_millis());

	let mut png_buf = Vec::new();
	{
		let mut encoder = Encoder::new(&mut png_buf, w as u32, h as u32);
		encoder.set_color(Rgba);
		encoder.set_depth(Eight);
		let mut writer = encoder.write_header().unwrap();
		writer.write_image_data(canvas.as_bytes()).unwrap();
	}
	write(&png_name, &png_buf).unwrap();
}
