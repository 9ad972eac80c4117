//! Concurrency behaviour of the in-memory complaint store.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use complaint_desk::domain::ports::ComplaintStore;
use complaint_desk::domain::{ComplaintDraft, DisplayName, Email, SecretCode, User};
use complaint_desk::outbound::memory::{DEFAULT_ADMIN_SECRET, InMemoryComplaintStore};
use futures::executor::block_on;
use futures::future::join_all;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

const SUBMISSIONS: usize = 64;
const THREADS: usize = 8;

#[fixture]
fn store() -> Arc<InMemoryComplaintStore> {
    let admin = SecretCode::new(DEFAULT_ADMIN_SECRET).expect("admin secret");
    Arc::new(InMemoryComplaintStore::new(admin, Arc::new(DefaultClock)))
}

async fn register(store: &InMemoryComplaintStore, name: &str, email: &str) -> User {
    store
        .create_user(
            DisplayName::new(name).expect("valid name"),
            Email::new(email).expect("valid email"),
        )
        .await
        .expect("registration succeeds")
}

fn draft(n: usize) -> ComplaintDraft {
    ComplaintDraft::try_from_parts(format!("complaint {n}"), "", 3).expect("valid draft")
}

#[rstest]
#[actix_web::test]
async fn interleaved_submissions_receive_distinct_ids(store: Arc<InMemoryComplaintStore>) {
    let alice = register(&store, "Alice", "a@x.com").await;

    let results = join_all((0..SUBMISSIONS).map(|n| store.create_complaint(alice.id(), draft(n)))).await;

    let ids: HashSet<String> = results
        .into_iter()
        .map(|complaint| complaint.expect("submission succeeds").id().to_string())
        .collect();
    assert_eq!(ids.len(), SUBMISSIONS);

    let listed = store
        .user_complaints(alice.id())
        .await
        .expect("listing succeeds");
    assert_eq!(listed.len(), SUBMISSIONS);
}

#[rstest]
fn threads_submitting_in_parallel_lose_nothing(store: Arc<InMemoryComplaintStore>) {
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                block_on(async {
                    let user = register(&store, &format!("user {t}"), &format!("u{t}@x.com")).await;
                    for n in 0..SUBMISSIONS {
                        store
                            .create_complaint(user.id(), draft(n))
                            .await
                            .expect("submission succeeds");
                    }
                    user
                })
            })
        })
        .collect();

    let users: Vec<User> = handles
        .into_iter()
        .map(|handle| handle.join().expect("worker thread completes"))
        .collect();

    let all = block_on(store.all_complaints()).expect("admin listing succeeds");
    assert_eq!(all.len(), THREADS * SUBMISSIONS);
    let distinct: HashSet<String> = all.iter().map(|c| c.id().to_string()).collect();
    assert_eq!(distinct.len(), all.len());

    for user in &users {
        let own = block_on(store.user_complaints(user.id())).expect("listing succeeds");
        assert_eq!(own.len(), SUBMISSIONS);
        assert!(own.iter().all(|c| c.user_id() == user.id()));
    }
}

#[rstest]
fn resolving_while_submitting_keeps_both_effects(store: Arc<InMemoryComplaintStore>) {
    let alice = block_on(register(&store, "Alice", "a@x.com"));
    let first = block_on(store.create_complaint(alice.id(), draft(0))).expect("submission succeeds");

    let resolver = {
        let store = Arc::clone(&store);
        let id = first.id().clone();
        thread::spawn(move || {
            for _ in 0..SUBMISSIONS {
                block_on(store.resolve_complaint(&id)).expect("resolve succeeds");
            }
        })
    };
    for n in 1..=SUBMISSIONS {
        block_on(store.create_complaint(alice.id(), draft(n))).expect("submission succeeds");
    }
    resolver.join().expect("resolver thread completes");

    let resolved = block_on(store.complaint(first.id())).expect("lookup succeeds");
    assert!(resolved.is_resolved());
    let own = block_on(store.user_complaints(alice.id())).expect("listing succeeds");
    assert_eq!(own.len(), SUBMISSIONS + 1);
}
