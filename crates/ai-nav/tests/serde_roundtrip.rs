#![cfg(feature = "serde")]

use ai_nav::{DoorSolidMethod, Path, Vec2};

#[test]
fn path_roundtrips_via_serde() {
    let path = Path::new(vec![Vec2::new(0.5, 0.5), Vec2::new(1.5, 1.5), Vec2::new(2.5, 1.5)]);

    let json = serde_json::to_string(&path).expect("serialize path");
    let back: Path = serde_json::from_str(&json).expect("deserialize path");
    assert_eq!(back, path);
}

#[test]
fn door_method_uses_snake_case() {
    let json = serde_json::to_string(&DoorSolidMethod::AlwaysSolid).expect("serialize");
    assert_eq!(json, "\"always_solid\"");
    let back: DoorSolidMethod = serde_json::from_str("\"dynamic\"").expect("deserialize");
    assert_eq!(back, DoorSolidMethod::Dynamic);
}
