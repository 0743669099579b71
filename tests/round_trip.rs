use pretty_assertions::assert_eq;
use smfkit::prelude::*;

fn song() -> MidiFile<'static> {
    let conductor: Track = [
        DeltaEvent::new(0, MetaEvent::new(0x03, &b"Conductor"[..])),
        DeltaEvent::new(0, MetaEvent::new(0x51, &[0x07u8, 0xA1, 0x20][..])),
        DeltaEvent::new(0, MetaEvent::end_of_track()),
    ]
    .into_iter()
    .collect();

    let channel = Channel::new(9).unwrap();
    let mut drums: Track = [
        DeltaEvent::new(0, SysExEvent::new(&[0x7Eu8, 0x7F, 0x09, 0x01, 0xF7][..])),
        DeltaEvent::new(0, ChannelEvent::controller(channel, 7, 110).unwrap()),
        DeltaEvent::new(0, ChannelEvent::note_on(channel, 36, 127).unwrap()),
        DeltaEvent::new(0, ChannelEvent::note_on(channel, 42, 90).unwrap()),
        DeltaEvent::new(240, ChannelEvent::note_on(channel, 36, 0).unwrap()),
        DeltaEvent::new(0, ChannelEvent::note_on(channel, 42, 0).unwrap()),
        DeltaEvent::new(0, ChannelEvent::pitch_bend(channel, 0x00, 0x40).unwrap()),
        DeltaEvent::new(0, ChannelEvent::channel_aftertouch(channel, 12).unwrap()),
        DeltaEvent::new(0, ChannelEvent::channel_aftertouch(channel, 0).unwrap()),
        DeltaEvent::new(
            0,
            SysExEvent::with_status(0xF7, &[0x43u8, 0x12, 0x00][..]).unwrap(),
        ),
    ]
    .into_iter()
    .collect();
    drums.push(DeltaEvent::new(
        0x0FFF_FFFF,
        ChannelEvent::program_change(channel, 0).unwrap(),
    ));
    drums.push(DeltaEvent::new(0, MetaEvent::end_of_track()));

    MidiFile::new(FormatType::Simultaneous, 480, vec![conductor, drums])
}

#[test]
fn running_and_explicit_decode_the_same() {
    let file = song();

    let running = file.serialize_with(StatusMode::Running).unwrap();
    let explicit = file.serialize_with(StatusMode::Explicit).unwrap();
    // note on x3 and channel aftertouch x1 reuse the previous status
    assert_eq!(explicit.len() - running.len(), 4);

    assert_eq!(MidiFile::parse(&running).unwrap(), file);
    assert_eq!(MidiFile::parse(&explicit).unwrap(), file);
}

#[test]
fn serialize_is_stable() {
    let bytes = song().serialize().unwrap();
    let reparsed = MidiFile::parse(&bytes).unwrap();
    assert_eq!(reparsed.serialize().unwrap(), bytes);
}

#[test]
fn elided_status_on_the_wire() {
    let channel = Channel::One;
    let track = Track::new(vec![
        DeltaEvent::new(0, ChannelEvent::note_on(channel, 60, 100).unwrap()),
        DeltaEvent::new(0x60, ChannelEvent::note_on(channel, 60, 0).unwrap()),
    ]);
    let file = MidiFile::new(FormatType::SingleMultiChannel, 96, vec![track]);
    let bytes = file.serialize().unwrap();

    assert_eq!(
        &bytes[14..],
        &[
            0x4Du8, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x07, //
            0x00, 0x90, 60, 100, //
            0x60, 60, 0,
        ]
    );
}

#[test]
fn owned_parse_outlives_input() {
    let file = {
        let bytes = song().serialize().unwrap();
        MidiFile::parse(bytes).unwrap()
    };
    assert_eq!(file, song());

    let tracks = file.into_tracks();
    let (delta, event) = tracks[1].events()[10].clone().into_parts();
    assert_eq!(delta, 0x0FFF_FFFF);
    assert_eq!(event.status(), 0xC9);
}

#[test]
fn smpte_division_survives() {
    let division = Timing::new_smpte(SmpteFps::TwentyNine, 80).division();
    let file = MidiFile::new(FormatType::Simultaneous, division, song().into_tracks());

    let reparsed = MidiFile::parse(file.serialize().unwrap()).unwrap();
    assert_eq!(reparsed.time_division(), 0xE350);
    assert_eq!(
        reparsed.timing(),
        Ok(Timing::new_smpte(SmpteFps::TwentyNine, 80))
    );
}

#[cfg(feature = "std")]
#[test]
fn write_std_then_from_io() {
    let mut out: Vec<u8> = Vec::new();
    song().write_std(&mut out).unwrap();
    let file = MidiFile::from_io(out.as_slice()).unwrap();
    assert_eq!(file, song());
}
