use super::Scroll;

#[test]
fn it_stops_at_the_end_of_the_list() {
    let mut scroll = Scroll::default();
    scroll.set_state(15, 10);

    scroll.down_page();
    assert_eq!(scroll.position, 5);

    scroll.down();
    assert_eq!(scroll.position, 5);
}

#[test]
fn it_never_scrolls_a_list_that_fits() {
    let mut scroll = Scroll::default();
    scroll.set_state(4, 10);

    scroll.down();
    assert_eq!(scroll.position, 0);
}

#[test]
fn it_scrolls_up_and_resets() {
    let mut scroll = Scroll::default();
    scroll.set_state(40, 10);

    scroll.down_page();
    scroll.up();
    assert_eq!(scroll.position, 9);

    scroll.reset();
    assert_eq!(scroll.position, 0);

    scroll.up_page();
    assert_eq!(scroll.position, 0);
}

#[test]
fn it_clamps_when_the_viewport_grows() {
    let mut scroll = Scroll::default();
    scroll.set_state(40, 10);
    scroll.down_page();
    scroll.down_page();
    assert_eq!(scroll.position, 20);

    scroll.set_state(40, 30);
    assert_eq!(scroll.position, 10);
}
