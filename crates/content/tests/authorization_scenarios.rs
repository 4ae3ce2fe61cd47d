//! End-to-end authorization scenarios over real content items.
//!
//! Each test builds a membership snapshot the way a request handler would, then asks
//! the resolver about programs, events and tasks.

use chrono::{Duration, Utc};

use plannr_auth::{
    AccessDenied, AuthzError, Decision, Denial, Grant, MembershipSnapshot, Operation,
    PermissionResolver, Principal, Role, ScopeRef, WorkspaceAccess,
};
use plannr_content::{
    Comment, Content, ContentAttributes, ContentKind, EventDetails, Group, NewContent,
    ProgramDetails, TaskDetails, Workspace,
};
use plannr_core::{CommentId, ContentId, Entity, GroupId, TroopId, UserId, WorkspaceId};

fn init_tracing() {
    plannr_observability::init();
}

fn workspace(name: &str) -> Workspace {
    Workspace::new(WorkspaceId::new(), name, None).unwrap()
}

fn program_in(ws: &Workspace, author: &Principal, public: bool) -> Content {
    Content::create(
        ContentId::new(),
        author.id(),
        *ws.id(),
        NewContent {
            public,
            attributes: ContentAttributes::named("Orienteering"),
            kind: ContentKind::Program(ProgramDetails::default()),
        },
        Utc::now(),
    )
    .unwrap()
}

fn event_in(ws: &Workspace, author: &Principal, public: bool) -> Content {
    let start = Utc::now();
    Content::create(
        ContentId::new(),
        author.id(),
        *ws.id(),
        NewContent {
            public,
            attributes: ContentAttributes::named("Spring campout"),
            kind: ContentKind::Event(EventDetails {
                start,
                end: Some(start + Duration::days(2)),
                program_id: None,
            }),
        },
        Utc::now(),
    )
    .unwrap()
}

fn task_in(ws: &Workspace, author: &Principal, public: bool) -> Content {
    Content::create(
        ContentId::new(),
        author.id(),
        *ws.id(),
        NewContent {
            public,
            attributes: ContentAttributes::named("Pack first-aid kit"),
            kind: ContentKind::Task(TaskDetails {
                event_id: ContentId::new(),
                estimated_duration: Some(15),
                participant_min: Some(1),
                participant_max: Some(2),
            }),
        },
        Utc::now(),
    )
    .unwrap()
}

/// Workspace W with owner A, viewer B; D is a stranger.
struct Troop {
    snapshot: MembershipSnapshot,
    ws: Workspace,
    a: Principal,
    b: Principal,
    d: Principal,
}

fn troop() -> Troop {
    init_tracing();
    let ws = workspace("Troop 42");
    let (a, b, d) = (
        Principal::user(UserId::new()),
        Principal::user(UserId::new()),
        Principal::user(UserId::new()),
    );
    let mut snapshot = MembershipSnapshot::new();
    snapshot.insert_scope(ws.scope());
    snapshot.add_membership(ws.scope(), a.id(), Role::Owner).unwrap();
    snapshot.add_membership(ws.scope(), b.id(), Role::Viewer).unwrap();
    Troop {
        snapshot,
        ws,
        a,
        b,
        d,
    }
}

#[test]
fn owner_author_has_full_control() {
    let t = troop();
    let c = program_in(&t.ws, &t.a, false);
    let r = PermissionResolver::new(&t.snapshot);

    assert_eq!(r.can_edit(Some(&t.a), &c), Ok(true));
    assert_eq!(r.can_delete(Some(&t.a), &c), Ok(true));
    assert_eq!(r.can_view(Some(&t.a), &c), Ok(true));
}

#[test]
fn viewer_can_only_view() {
    let t = troop();
    let c = program_in(&t.ws, &t.a, false);
    let r = PermissionResolver::new(&t.snapshot);

    assert_eq!(r.can_view(Some(&t.b), &c), Ok(true));
    assert_eq!(r.can_edit(Some(&t.b), &c), Ok(false));
    assert_eq!(r.can_delete(Some(&t.b), &c), Ok(false));
}

#[test]
fn stranger_cannot_see_private_content_and_gets_404() {
    let t = troop();
    let c = program_in(&t.ws, &t.a, false);
    let r = PermissionResolver::new(&t.snapshot);

    let decision = r.check_view(Some(&t.d), &c).unwrap();
    assert_eq!(decision, Decision::Deny(Denial::NotMember));

    let denial = decision.denial().unwrap();
    assert_eq!(
        AccessDenied::classify(Operation::View, &denial, c.is_public()).status_code(),
        404
    );
}

#[test]
fn stranger_edit_and_delete_on_private_content_also_get_404() {
    let t = troop();
    let c = task_in(&t.ws, &t.a, false);
    let r = PermissionResolver::new(&t.snapshot);

    for (op, decision) in [
        (Operation::Edit, r.check_edit(Some(&t.d), &c).unwrap()),
        (Operation::Delete, r.check_delete(Some(&t.d), &c).unwrap()),
    ] {
        let denial = decision.denial().unwrap();
        assert_eq!(denial, Denial::NotMember);
        assert_eq!(
            AccessDenied::classify(op, &denial, c.is_public()).status_code(),
            404,
            "{op}"
        );
    }
}

#[test]
fn public_content_is_visible_to_strangers_and_anonymous() {
    let t = troop();
    let c = program_in(&t.ws, &t.a, true);
    let r = PermissionResolver::new(&t.snapshot);

    assert_eq!(r.can_view(Some(&t.d), &c), Ok(true));
    assert_eq!(r.can_view(None, &c), Ok(true));
    // Visibility says nothing about editing.
    assert_eq!(r.can_edit(Some(&t.d), &c), Ok(false));
}

#[test]
fn demotion_revokes_author_edit() {
    init_tracing();
    let w2 = workspace("Pack 7");
    let e = Principal::user(UserId::new());
    let mut snapshot = MembershipSnapshot::new();
    snapshot.insert_scope(w2.scope());
    snapshot.add_membership(w2.scope(), e.id(), Role::Editor).unwrap();
    let c2 = event_in(&w2, &e, false);

    assert_eq!(PermissionResolver::new(&snapshot).can_edit(Some(&e), &c2), Ok(true));

    snapshot
        .update_membership(w2.scope(), e.id(), Role::Viewer)
        .unwrap();
    assert_eq!(PermissionResolver::new(&snapshot).can_edit(Some(&e), &c2), Ok(false));
    assert_eq!(
        PermissionResolver::new(&snapshot).can_view(Some(&e), &c2),
        Ok(true)
    );
}

#[test]
fn system_admin_edits_everywhere_but_creates_only_with_membership() {
    let t = troop();
    let f = Principal::new(UserId::new(), true);
    let r = PermissionResolver::new(&t.snapshot);

    for c in [
        program_in(&t.ws, &t.a, false),
        event_in(&t.ws, &t.a, true),
        task_in(&t.ws, &t.b, false),
    ] {
        assert_eq!(r.can_edit(Some(&f), &c), Ok(true));
        assert_eq!(r.can_delete(Some(&f), &c), Ok(true));
    }
    assert_eq!(r.can_create(Some(&f), t.ws.scope()), Ok(false));

    let mut snapshot = t.snapshot.clone();
    snapshot.add_membership(t.ws.scope(), f.id(), Role::Editor).unwrap();
    assert_eq!(
        PermissionResolver::new(&snapshot).can_create(Some(&f), t.ws.scope()),
        Ok(true)
    );
}

#[test]
fn editor_author_can_edit_but_not_delete_any_content_type() {
    let mut t = troop();
    let editor = Principal::user(UserId::new());
    t.snapshot
        .add_membership(t.ws.scope(), editor.id(), Role::Editor)
        .unwrap();
    let r = PermissionResolver::new(&t.snapshot);

    for c in [
        program_in(&t.ws, &editor, false),
        event_in(&t.ws, &editor, false),
        task_in(&t.ws, &editor, false),
    ] {
        assert_eq!(r.can_edit(Some(&editor), &c), Ok(true), "{}", c.content_type());
        assert_eq!(r.can_delete(Some(&editor), &c), Ok(false), "{}", c.content_type());
    }
}

#[test]
fn group_roles_do_not_leak_into_workspaces() {
    let mut t = troop();
    let group = Group::new(GroupId::new(), "District 3", None).unwrap();
    let g_owner = Principal::user(UserId::new());
    t.snapshot.insert_scope(group.scope());
    t.snapshot
        .add_membership(group.scope(), g_owner.id(), Role::Owner)
        .unwrap();
    let c = program_in(&t.ws, &t.a, false);
    let r = PermissionResolver::new(&t.snapshot);

    assert_eq!(r.can_create(Some(&g_owner), group.scope()), Ok(true));
    assert_eq!(r.can_view(Some(&g_owner), &c), Ok(false));
    assert_eq!(r.role_of(&g_owner, t.ws.scope()), Ok(None));
}

#[test]
fn content_in_a_vanished_workspace_is_a_malformed_reference() {
    let mut t = troop();
    let c = program_in(&t.ws, &t.a, false);
    t.snapshot.remove_scope(t.ws.scope()).unwrap();
    let r = PermissionResolver::new(&t.snapshot);

    assert_eq!(
        r.can_view(Some(&t.a), &c),
        Err(AuthzError::MalformedReference {
            content_id: Some(*c.id()),
            workspace_id: *t.ws.id(),
        })
    );
    let missing = WorkspaceId::new();
    assert_eq!(
        r.can_create(Some(&t.a), missing),
        Err(AuthzError::ScopeNotFound(ScopeRef::Workspace(missing)))
    );
}

#[test]
fn copied_program_belongs_to_the_copier_in_the_new_workspace() {
    let mut t = troop();
    let other = workspace("Pack 7");
    t.snapshot.insert_scope(other.scope());
    t.snapshot
        .add_membership(other.scope(), t.b.id(), Role::Editor)
        .unwrap();
    let source = program_in(&t.ws, &t.a, false);
    let r = PermissionResolver::new(&t.snapshot);

    assert!(
        r.check_copy_program(Some(&t.b), &source, *other.id())
            .unwrap()
            .is_allowed()
    );
    // Viewer in the source workspace only: copying back into it is not a create right.
    assert!(
        !r.check_copy_program(Some(&t.b), &source, *t.ws.id())
            .unwrap()
            .is_allowed()
    );

    let copy = source
        .copy_program(ContentId::new(), t.b.id(), *other.id(), Utc::now())
        .unwrap();
    assert_eq!(r.can_edit(Some(&t.b), &copy), Ok(true));
    assert_eq!(
        r.check_tag_content(Some(&t.b), &copy),
        Decision::Allow(Grant::Author)
    );
    assert_eq!(
        r.check_tag_content(Some(&t.a), &copy),
        Decision::Deny(Denial::NotAuthor)
    );
}

#[test]
fn comments_and_troops_follow_their_own_rules() {
    let t = troop();
    let c = program_in(&t.ws, &t.a, false);
    let comment = Comment::new(CommentId::new(), *c.id(), t.b.id(), "Bring gloves", Utc::now())
        .unwrap();
    let scouts = plannr_content::Troop::new(TroopId::new(), "Eagles", *t.ws.id()).unwrap();
    let r = PermissionResolver::new(&t.snapshot);

    // The workspace owner cannot rewrite a viewer's comment.
    assert!(r.check_edit_comment(Some(&t.b), &comment).is_allowed());
    assert!(!r.check_edit_comment(Some(&t.a), &comment).is_allowed());

    let read = |p: &Principal| {
        r.check_workspace_resource(Some(p), &scouts, WorkspaceAccess::Read)
            .unwrap()
            .is_allowed()
    };
    let write = |p: &Principal| {
        r.check_workspace_resource(Some(p), &scouts, WorkspaceAccess::Write)
            .unwrap()
            .is_allowed()
    };
    assert!(read(&t.b) && !write(&t.b));
    assert!(read(&t.a) && write(&t.a));
    assert!(!read(&t.d));
}
