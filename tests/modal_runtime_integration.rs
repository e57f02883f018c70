use std::sync::{Arc, Mutex};
use std::time::Duration;

use color_eyre::eyre::{eyre, Result};
use pretty_assertions::assert_eq;

use replysheet::{
    CommentRef, ModalHandle, ModalRuntime, ModalSnapshot, ModalTiming, PostRef, Visibility,
};

async fn flushed(handle: &ModalHandle) -> Result<ModalSnapshot> {
    handle
        .flush()
        .await
        .ok_or_else(|| eyre!("modal loop stopped"))
}

#[tokio::test(start_paused = true)]
async fn test_enable_post_reaches_showing_post() -> Result<()> {
    let (handle, _join) = ModalRuntime::spawn(ModalTiming::default());
    let p: PostRef = "t3_p".parse()?;

    handle.enable(p.clone());
    let snapshot = flushed(&handle).await?;

    assert_eq!(snapshot.visibility, Visibility::ShowingPost);
    assert_eq!(snapshot.current_post, p);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_settle_timer_clears_subjects() -> Result<()> {
    let (handle, _join) = ModalRuntime::spawn(ModalTiming::default());
    let c: CommentRef = "t1_c".parse()?;
    handle.enable(c.clone());
    flushed(&handle).await?;

    handle.disable();
    let snapshot = flushed(&handle).await?;
    assert_eq!(snapshot.visibility, Visibility::None);
    assert_eq!(snapshot.current_comment, c);

    tokio::time::sleep(Duration::from_millis(399)).await;
    assert_eq!(flushed(&handle).await?.current_comment, c);

    tokio::time::sleep(Duration::from_millis(2)).await;
    let snapshot = flushed(&handle).await?;
    assert!(snapshot.current_comment.is_placeholder());
    assert!(snapshot.current_post.is_placeholder());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_reenable_before_settle_keeps_new_subject() -> Result<()> {
    let (handle, _join) = ModalRuntime::spawn(ModalTiming::default());
    handle.enable("t3_old".parse::<PostRef>()?);
    flushed(&handle).await?;

    handle.disable();
    flushed(&handle).await?;
    tokio::time::sleep(Duration::from_millis(200)).await;

    let fresh: PostRef = "t3_fresh".parse()?;
    handle.enable(fresh.clone());
    flushed(&handle).await?;

    tokio::time::sleep(Duration::from_secs(1)).await;
    let snapshot = flushed(&handle).await?;
    assert_eq!(snapshot.visibility, Visibility::ShowingPost);
    assert_eq!(snapshot.current_post, fresh);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_observer_sees_direct_cross_transition() -> Result<()> {
    let (handle, _join) = ModalRuntime::spawn(ModalTiming::default());
    handle.enable("t3_p".parse::<PostRef>()?);
    flushed(&handle).await?;

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    handle.add_observer(move |snapshot: &ModalSnapshot| {
        if let Ok(mut seen) = sink.lock() {
            seen.push(snapshot.visibility);
        }
    });

    handle.enable("t1_c".parse::<CommentRef>()?);
    flushed(&handle).await?;

    let seen: Vec<Visibility> = seen.lock().map(|s| s.clone()).unwrap_or_default();
    assert_eq!(
        seen,
        vec![Visibility::ShowingPost, Visibility::ShowingComment]
    );

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_watch_subscription_pushes_changes() -> Result<()> {
    let (handle, _join) = ModalRuntime::spawn(ModalTiming::default());
    let mut rx = handle.subscribe();

    handle.enable("t3_p".parse::<PostRef>()?);
    let snapshot = rx
        .wait_for(|s| s.visibility == Visibility::ShowingPost)
        .await?
        .clone();

    assert_eq!(snapshot.current_post, "t3_p".parse::<PostRef>()?);
    assert!(snapshot.revision >= 1);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_handles_share_one_state() -> Result<()> {
    let (handle, _join) = ModalRuntime::spawn(ModalTiming::default());
    let other = handle.clone();

    handle.enable("t3_p".parse::<PostRef>()?);
    other.disable();
    let snapshot = flushed(&handle).await?;

    assert_eq!(snapshot.visibility, Visibility::None);
    assert_eq!(other.snapshot(), snapshot);

    Ok(())
}
