use portfolio_interactions::components::carousel::Carousel;
use portfolio_interactions::components::nav::NavMenu;
use portfolio_interactions::components::scroll::{active_section, href_for, scroll_progress};
use portfolio_interactions::components::stats::{displayed_value, parse_target};
use portfolio_interactions::Config;

/// Open the menu, then click a link inside it: closed with aria-expanded cleared.
#[test]
fn opening_then_following_a_link_closes_the_menu() {
    let config = Config::default();
    let mut menu = NavMenu::new(config.nav_breakpoint_px);

    menu.toggle();
    assert!(menu.is_open());
    assert_eq!(menu.aria_expanded(), "true");

    // Clicking padding between links leaves the menu alone.
    assert!(!menu.on_list_click(false));
    assert!(menu.is_open());

    assert!(menu.on_list_click(true));
    assert!(!menu.is_open());
    assert_eq!(menu.aria_expanded(), "false");
}

#[test]
fn widening_past_the_breakpoint_closes_an_open_menu() {
    let mut menu = NavMenu::new(Config::default().nav_breakpoint_px);
    menu.toggle();
    assert!(menu.on_resize(769.0));
    assert_eq!(menu.aria_expanded(), "false");
}

#[test]
fn hovering_freezes_autoplay_until_pointer_leaves() {
    let mut carousel = Carousel::new(3, true).unwrap();
    carousel.tick();
    assert_eq!(carousel.index(), 1);

    carousel.pointer_enter();
    assert!(!carousel.is_playing());
    for _ in 0..5 {
        assert!(!carousel.tick());
    }
    assert_eq!(carousel.index(), 1);

    assert!(carousel.pointer_leave());
    carousel.tick();
    carousel.tick();
    assert_eq!(carousel.index(), 0);
}

#[test]
fn dot_click_overrides_autoplay_position() {
    let mut carousel = Carousel::new(5, true).unwrap();
    for _ in 0..7 {
        carousel.tick();
    }
    assert_eq!(carousel.index(), 2);
    assert!(carousel.select(4));
    assert_eq!(carousel.index(), 4);
    assert_eq!((0..5).filter(|&d| carousel.is_active_dot(d)).count(), 1);
    carousel.tick();
    assert_eq!(carousel.index(), 0);
}

#[test]
fn scroll_tracking_follows_the_page() {
    let config = Config::default();
    let tops = [0.0, 500.0, 1200.0];

    assert_eq!(active_section(&tops, 0.0, config.section_offset_px), Some(0));
    assert_eq!(active_section(&tops, 600.0, config.section_offset_px), Some(1));
    assert_eq!(href_for("about"), "#about");

    assert_eq!(scroll_progress(0.0, 2000.0, 2400.0), 0.0);
    assert_eq!(scroll_progress(1600.0, 2400.0, 800.0), 100.0);
}

#[test]
fn counter_lands_on_configured_target() {
    let config = Config::default();
    let target = parse_target(Some("1500"));
    assert_eq!(displayed_value(target, config.stat_duration_ms, config.stat_duration_ms), 1500);
    assert_eq!(displayed_value(parse_target(Some("n/a")), 600.0, config.stat_duration_ms), 0);
}
