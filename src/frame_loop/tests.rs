// src/frame_loop/tests.rs

use super::*;
use crate::color::{pack_xrgb, Color};
use crate::config::{FrameConfig, RectConfig, RectList};
use crate::display::{MockPresenter, ShellEvent, WindowStates};
use crate::surface::Extent;

fn quiet_config(rects: Vec<RectConfig>) -> Config {
    Config {
        frame: FrameConfig {
            interval_ms: 0,
            max_frames: None,
        },
        rects: RectList(rects),
        ..Config::default()
    }
}

fn magenta(x: u32, y: u32, width: u32, height: u32) -> RectConfig {
    RectConfig {
        x,
        y,
        width,
        height,
        color: Color::Packed(0xff00ff),
    }
}

#[test_log::test]
fn it_should_present_full_damage_each_frame() -> Result<()> {
    let mut presenter = MockPresenter::new(Extent::new(8, 6));
    let mut frame_loop = FrameLoop::new(&quiet_config(vec![]));

    assert_eq!(frame_loop.run_frame(&mut presenter)?, FrameStatus::Running);
    assert_eq!(frame_loop.run_frame(&mut presenter)?, FrameStatus::Running);

    assert_eq!(frame_loop.frames(), 2);
    assert_eq!(
        presenter.presented(),
        &[Damage::full(Extent::new(8, 6)), Damage::full(Extent::new(8, 6))]
    );
    Ok(())
}

#[test_log::test]
fn it_should_draw_rects_over_the_gradient() -> Result<()> {
    let mut presenter = MockPresenter::new(Extent::new(10, 10));
    let mut frame_loop = FrameLoop::new(&quiet_config(vec![magenta(2, 2, 5, 5)]));

    frame_loop.run_frame(&mut presenter)?;

    let frame = &presenter.frames()[0];
    assert_eq!(frame[2 + 2 * 10], 0xff00ff);
    assert_eq!(frame[4 + 4 * 10], 0xff00ff);
    // Outside the rect the gradient shows through, starting from its seed.
    assert_eq!(frame[0], pack_xrgb(0xff, 0x99, 0x00));
    assert_eq!(frame[1], pack_xrgb(0x01, 0x9a, 0x01));
    Ok(())
}

#[test_log::test]
fn it_should_leave_the_buffer_alone_without_background_or_rects() -> Result<()> {
    let mut config = quiet_config(vec![]);
    config.background.enabled = false;
    let mut presenter = MockPresenter::new(Extent::new(3, 3));
    let mut frame_loop = FrameLoop::new(&config);

    frame_loop.run_frame(&mut presenter)?;

    assert!(presenter.frames()[0].iter().all(|&p| p == 0));
    Ok(())
}

#[test_log::test]
fn it_should_shut_down_once_close_is_delivered() -> Result<()> {
    let mut presenter = MockPresenter::new(Extent::new(4, 4));
    presenter.push_event(ShellEvent::Close);
    let mut frame_loop = FrameLoop::new(&quiet_config(vec![]));

    // Close arrives during the first present, so the second cycle stops.
    let frames = frame_loop.run(&mut presenter)?;

    assert_eq!(frames, 1);
    assert_eq!(presenter.presented().len(), 1);
    Ok(())
}

#[test_log::test]
fn it_should_stop_at_the_frame_budget() -> Result<()> {
    let mut config = quiet_config(vec![]);
    config.frame.max_frames = Some(3);
    let mut presenter = MockPresenter::new(Extent::new(2, 2));

    let frames = FrameLoop::new(&config).run(&mut presenter)?;

    assert_eq!(frames, 3);
    assert_eq!(presenter.frames().len(), 3);
    Ok(())
}

#[test_log::test]
fn it_should_follow_a_resize_with_the_next_frame() -> Result<()> {
    let mut presenter = MockPresenter::new(Extent::new(4, 4));
    presenter.push_event(ShellEvent::Configure {
        width: 6,
        height: 2,
        states: WindowStates::empty(),
    });
    let mut frame_loop = FrameLoop::new(&quiet_config(vec![magenta(0, 0, 100, 100)]));

    frame_loop.run_frame(&mut presenter)?;
    frame_loop.run_frame(&mut presenter)?;

    assert_eq!(presenter.presented()[1], Damage::full(Extent::new(6, 2)));
    assert_eq!(presenter.frames()[1].len(), 12);
    assert!(presenter.frames()[1].iter().all(|&p| p == 0xff00ff));
    Ok(())
}
