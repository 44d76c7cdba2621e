//! Tests for theme resolution against the OS colour scheme

use ebillr::prefs::{PreferenceStore, ThemeChoice};
use ebillr::storage::MemoryStore;
use ebillr::theme::{ColorScheme, ColorSchemeSignal, ThemeResolver, ThemeState, resolve};
use std::sync::{Arc, Mutex};

fn setup(os: ColorScheme) -> (PreferenceStore, ColorSchemeSignal, ThemeResolver) {
    let store = PreferenceStore::new(Arc::new(MemoryStore::new()));
    let signal = ColorSchemeSignal::new(os);
    let resolver = ThemeResolver::new(store.clone(), signal.clone());
    (store, signal, resolver)
}

#[test]
fn test_resolution_table() {
    use ColorScheme::{Dark, Light};
    for (choice, os, applied) in [
        (ThemeChoice::Light, Dark, Light),
        (ThemeChoice::Dark, Light, Dark),
        (ThemeChoice::Auto, Dark, Dark),
        (ThemeChoice::Auto, Light, Light),
    ] {
        assert_eq!(resolve(choice, os), applied);
    }
}

#[test]
fn test_initial_state_applies_default_auto() {
    let (_, _, resolver) = setup(ColorScheme::Dark);
    assert_eq!(
        resolver.state(),
        ThemeState {
            choice: ThemeChoice::Auto,
            applied: ColorScheme::Dark,
        }
    );
}

#[test]
fn test_auto_follows_os_without_persisting() {
    let (store, signal, resolver) = setup(ColorScheme::Light);
    resolver.set_theme(ThemeChoice::Auto).unwrap();
    assert_eq!(resolver.applied(), ColorScheme::Light);

    signal.publish(ColorScheme::Dark);

    assert_eq!(resolver.applied(), ColorScheme::Dark);
    assert_eq!(resolver.choice(), ThemeChoice::Auto);
    assert_eq!(store.load().theme, ThemeChoice::Auto);
}

#[test]
fn test_manual_choice_ignores_os_changes() {
    let (store, signal, resolver) = setup(ColorScheme::Dark);
    resolver.set_theme(ThemeChoice::Light).unwrap();

    signal.publish(ColorScheme::Light);
    signal.publish(ColorScheme::Dark);

    assert_eq!(resolver.applied(), ColorScheme::Light);
    assert_eq!(store.load().theme, ThemeChoice::Light);

    // A fresh resolver keeps the override
    let reopened = ThemeResolver::new(store.clone(), signal.clone());
    assert_eq!(reopened.applied(), ColorScheme::Light);
}

#[test]
fn test_returning_to_auto_picks_up_current_os() {
    let (_, signal, resolver) = setup(ColorScheme::Light);
    resolver.set_theme(ThemeChoice::Light).unwrap();
    signal.publish(ColorScheme::Dark);

    let state = resolver.set_theme(ThemeChoice::Auto).unwrap();
    assert_eq!(state.applied, ColorScheme::Dark);
}

#[test]
fn test_toggle_flips_between_light_and_dark() {
    let (store, _, resolver) = setup(ColorScheme::Light);

    assert_eq!(resolver.toggle().unwrap().choice, ThemeChoice::Dark);
    assert_eq!(resolver.toggle().unwrap().choice, ThemeChoice::Light);
    assert_eq!(store.load().theme, ThemeChoice::Light);
}

#[test]
fn test_affordance_reflects_choice_not_resolution() {
    let (_, _, resolver) = setup(ColorScheme::Dark);
    resolver.set_theme(ThemeChoice::Auto).unwrap();

    // Applied dark, but the button still offers dark since the choice is auto
    let affordance = resolver.affordance();
    assert_eq!(affordance.active, ThemeChoice::Auto);
    assert_eq!(affordance.toggle_label, "Switch To Dark Theme");
    assert_eq!(affordance.toggle_icon, "moon");

    resolver.set_theme(ThemeChoice::Dark).unwrap();
    assert_eq!(resolver.affordance().toggle_label, "Switch To Light Theme");
}

#[test]
fn test_applied_subscribers_are_notified_once_per_change() {
    let (_, signal, resolver) = setup(ColorScheme::Light);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let _subscription = resolver.on_applied(move |state| {
        sink.lock().unwrap().push(state.applied);
    });

    signal.publish(ColorScheme::Dark);
    signal.publish(ColorScheme::Dark);
    resolver.set_theme(ThemeChoice::Light).unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![ColorScheme::Dark, ColorScheme::Light]
    );
}

#[test]
fn test_writes_from_another_handle_are_applied() {
    let (store, _, resolver) = setup(ColorScheme::Light);
    store.set_theme(ThemeChoice::Dark).unwrap();
    assert_eq!(resolver.applied(), ColorScheme::Dark);
}
