use showreel::{
    CaptionTrack, CaptionVariant, LowerThird, OverlayStyle, ProjectBuilder, Rgba8, TextCallout,
    Vec2,
};

fn main() -> anyhow::Result<()> {
    let project = ProjectBuilder::new("demo", 8.0)
        .seed(11)
        .word("hands", 0.3, 0.7)
        .word("on", 0.7, 0.9)
        .word("demo", 0.9, 1.4)
        .captions(CaptionTrack {
            variant: CaptionVariant::Karaoke,
            ..CaptionTrack::default()
        })
        .camera_key(0.0, 1.0, 0.0, 0.0)
        .camera_key(6.0, 1.5, -6.0, 2.0)
        .callout(TextCallout {
            id: "hook".into(),
            text: "STAY WITH ME".into(),
            start_sec: 1.0,
            end_sec: 2.4,
            position: Vec2::new(0.5, 0.3),
            style: OverlayStyle::Slam,
            color: Rgba8::WHITE,
            rotation_deg: -2.0,
            shake: true,
        })
        .lower_third(LowerThird {
            id: "lt".into(),
            name: "Sam Ortiz".into(),
            title: "Producer".into(),
            start_sec: 1.0,
            end_sec: 4.0,
            accent: Rgba8::new(255, 87, 51, 255),
        })
        .build()?;

    println!("{}", serde_json::to_string_pretty(&project)?);
    Ok(())
}
