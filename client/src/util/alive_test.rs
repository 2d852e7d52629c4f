use std::cell::RefCell;

use futures::channel::oneshot;
use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;

use super::*;

#[test]
fn clones_share_cancellation() {
    let flag = AliveFlag::new();
    let task_flag = flag.clone();
    assert!(task_flag.is_alive());
    flag.cancel();
    assert!(!task_flag.is_alive());
}

#[test]
fn late_result_after_cancel_is_dropped() {
    let flag = AliveFlag::new();
    let written = std::rc::Rc::new(RefCell::new(None::<u32>));
    let (tx, rx) = oneshot::channel::<u32>();

    let mut pool = LocalPool::new();
    let task_flag = flag.clone();
    let task_written = written.clone();
    pool.spawner()
        .spawn_local(async move {
            if let Ok(value) = rx.await {
                task_flag.deliver(value, |v| *task_written.borrow_mut() = Some(v));
            }
        })
        .expect("spawn");

    pool.run_until_stalled();
    flag.cancel();
    tx.send(7).expect("send");
    pool.run_until_stalled();
    assert_eq!(*written.borrow(), None);
}

#[test]
fn live_result_is_delivered() {
    let flag = AliveFlag::default();
    let mut out = 0;
    assert!(flag.deliver(3, |v| out = v));
    assert_eq!(out, 3);
}
