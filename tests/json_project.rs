use showreel::{AspectRatio, Composition, FrameIndex, Project, compose_frame, fingerprint_frame};

#[test]
fn showcase_fixture_validates() {
    let s = include_str!("data/showcase.json");
    let project: Project = serde_json::from_str(s).unwrap();
    project.validate().unwrap();
}

#[test]
fn fixture_binds_to_every_aspect() {
    let s = include_str!("data/showcase.json");
    let project: Project = serde_json::from_str(s).unwrap();

    for aspect in AspectRatio::ALL {
        let comp = Composition::new(project.clone(), aspect).unwrap();
        assert_eq!(comp.resolution(), aspect.resolution());
        assert_eq!(comp.total_frames(), 360);
    }
}

#[test]
fn project_roundtrips_through_json() {
    let s = include_str!("data/showcase.json");
    let project: Project = serde_json::from_str(s).unwrap();
    let reparsed: Project =
        serde_json::from_str(&serde_json::to_string(&project).unwrap()).unwrap();

    let a = Composition::new(project, AspectRatio::Vertical).unwrap();
    let b = Composition::new(reparsed, AspectRatio::Vertical).unwrap();
    for f in [0u64, 61, 150, 359] {
        let fa = fingerprint_frame(&compose_frame(&a, FrameIndex(f)).unwrap());
        let fb = fingerprint_frame(&compose_frame(&b, FrameIndex(f)).unwrap());
        assert_eq!(fa, fb, "frame {f} diverged after a JSON round trip");
    }
}

#[test]
fn composition_deserialization_revalidates() {
    let s = include_str!("data/showcase.json");
    let project: Project = serde_json::from_str(s).unwrap();
    let comp = Composition::new(project, AspectRatio::Wide).unwrap();

    let json = serde_json::to_string(&comp).unwrap();
    let back: Composition = serde_json::from_str(&json).unwrap();
    assert_eq!(back.aspect(), AspectRatio::Wide);
    assert_eq!(back.total_frames(), comp.total_frames());

    // A stored composition with corrupt timing fails at parse time.
    let bad = json.replace("\"duration_sec\":12.0", "\"duration_sec\":-1.0");
    assert_ne!(bad, json);
    assert!(serde_json::from_str::<Composition>(&bad).is_err());
}

#[test]
fn unknown_overlay_ease_degrades_instead_of_failing() {
    // Editors ship easing names faster than engines learn them.
    let s = include_str!("data/showcase.json");
    let tweaked = s.replace("\"ease\": \"ease-out\"", "\"ease\": \"elastic-snap\"");
    assert_ne!(tweaked, s);

    let project: Project = serde_json::from_str(&tweaked).unwrap();
    project.validate().unwrap();
    assert_eq!(
        project.camera.keyframes[1].ease,
        showreel::Ease::Linear
    );
}
