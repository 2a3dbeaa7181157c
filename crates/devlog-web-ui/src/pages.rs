//! Page layout: header, sidebar, main area and footer

use devlog_core::config::DEFAULT_BASE_URL;
use devlog_core::{Project, Session};
use leptos::*;

use crate::components::{Button, ButtonKind, ButtonSize, Card, TextInput};
use crate::state::AppContext;

pub const EMPTY_LIST: &str = "No projects yet. Create your first one above.";

const NAVIGATION: [&str; 4] = ["Overview", "Projects", "Logs", "Settings"];

/// Top bar with the shared search term, backend URL and sign-out
#[component]
pub fn Header() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let state = ctx.state;
    let session = ctx.session;
    let authenticated = create_memo(move |_| session.with(Session::is_authenticated));

    let on_search = {
        let wb = ctx.workbench();
        move |value: String| wb.set_search(value)
    };
    let submit_search = {
        let ctx = ctx.clone();
        move |_: ()| ctx.spawn(|wb| async move { wb.search().await })
    };
    let on_base_url = {
        let wb = ctx.workbench();
        move |value: String| wb.set_base_url(value)
    };
    let sign_out = {
        let wb = ctx.workbench();
        move |_: web_sys::MouseEvent| wb.logout()
    };

    view! {
        <header class="topbar">
            <div class="brand">"DevLog"</div>
            <div class="topbar-search">
                <TextInput
                    placeholder="Search projects…"
                    value=Signal::derive(move || state.with(|s| s.search.clone()))
                    on_input=on_search
                    on_submit=submit_search
                />
            </div>
            <div class="topbar-right" title="Backend URL">
                <TextInput
                    placeholder=DEFAULT_BASE_URL
                    value=Signal::derive(move || session.with(|s| s.base_url.clone()))
                    on_input=on_base_url
                />
                {move || {
                    let sign_out = sign_out.clone();
                    authenticated.get().then(move || view! {
                        <Button kind=ButtonKind::Ghost size=ButtonSize::Small on_click=sign_out>
                            "Sign out"
                        </Button>
                    })
                }}
            </div>
        </header>
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    view! {
        <aside class="sidebar">
            <Card title="Navigation">
                <nav class="sidebar-nav">
                    {NAVIGATION
                        .iter()
                        .map(|item| view! { <a class="nav-link" href="#">{*item}</a> })
                        .collect_view()}
                </nav>
            </Card>
        </aside>
    }
}

/// Sign-in card while anonymous, the project workspace otherwise
#[component]
pub fn MainContent() -> impl IntoView {
    let session = expect_context::<AppContext>().session;
    let authenticated = create_memo(move |_| session.with(Session::is_authenticated));

    view! {
        <main class="main">
            {move || {
                if authenticated.get() {
                    view! {
                        <ActionBar/>
                        <ProjectListCard/>
                        <StatusLine/>
                    }
                    .into_view()
                } else {
                    view! { <SignInCard/> }.into_view()
                }
            }}
        </main>
    }
}

#[component]
pub fn SignInCard() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let state = ctx.state;
    let can_submit = move || state.with(|s| s.login.can_submit());

    let on_username = {
        let wb = ctx.workbench();
        move |value: String| wb.set_username(value)
    };
    let on_password = {
        let wb = ctx.workbench();
        move |value: String| wb.set_password(value)
    };
    let sign_in = {
        let ctx = ctx.clone();
        move |_: web_sys::MouseEvent| ctx.spawn(|wb| async move { wb.login().await })
    };

    view! {
        <Card title="Sign in">
            <div class="sign-in-grid">
                <TextInput
                    label="Username"
                    autofocus=true
                    value=Signal::derive(move || state.with(|s| s.login.username.clone()))
                    on_input=on_username
                />
                <TextInput
                    label="Password"
                    password=true
                    value=Signal::derive(move || state.with(|s| s.login.password.clone()))
                    on_input=on_password
                />
                <div class="sign-in-submit">
                    <Button on_click=sign_in disabled=Signal::derive(move || !can_submit())>
                        "Sign in"
                    </Button>
                </div>
            </div>
            <StatusLine error=true/>
        </Card>
    }
}

/// New-project form with Create and Refresh
#[component]
pub fn ActionBar() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let state = ctx.state;

    let on_title = {
        let wb = ctx.workbench();
        move |value: String| wb.set_new_title(value)
    };
    let on_description = {
        let wb = ctx.workbench();
        move |value: String| wb.set_new_description(value)
    };
    let create = {
        let ctx = ctx.clone();
        move |_: web_sys::MouseEvent| ctx.spawn(|wb| async move { wb.create().await })
    };
    let refresh = {
        let ctx = ctx.clone();
        move |_: web_sys::MouseEvent| ctx.spawn(|wb| async move { wb.refresh().await })
    };

    view! {
        <Card>
            <div class="action-bar">
                <div class="action-fields">
                    <TextInput
                        label="New project name"
                        placeholder="awesome-project"
                        value=Signal::derive(move || state.with(|s| s.create.title.clone()))
                        on_input=on_title
                    />
                    <TextInput
                        label="Description"
                        placeholder="Optional description"
                        value=Signal::derive(move || state.with(|s| s.create.description.clone()))
                        on_input=on_description
                    />
                </div>
                <div class="action-buttons">
                    <Button
                        on_click=create
                        disabled=Signal::derive(move || !state.with(|s| s.create.can_submit()))
                    >
                        "Create project"
                    </Button>
                    <Button kind=ButtonKind::Ghost on_click=refresh>"Refresh"</Button>
                </div>
            </div>
        </Card>
    }
}

#[component]
pub fn ProjectListCard() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let state = ctx.state;
    let projects = create_memo(move |_| state.with(|s| s.projects.items().to_vec()));

    let on_filter = {
        let wb = ctx.workbench();
        move |value: String| wb.set_search(value)
    };
    let submit_filter = {
        let ctx = ctx.clone();
        move |_: ()| ctx.spawn(|wb| async move { wb.search().await })
    };
    let search = {
        let ctx = ctx.clone();
        move |_: web_sys::MouseEvent| ctx.spawn(|wb| async move { wb.search().await })
    };

    view! {
        <Card>
            <div class="list-header">
                <div class="list-title">"Projects"</div>
                <div class="list-filter">
                    <TextInput
                        placeholder="Filter projects"
                        value=Signal::derive(move || state.with(|s| s.search.clone()))
                        on_input=on_filter
                        on_submit=submit_filter
                    />
                    <Button kind=ButtonKind::Ghost size=ButtonSize::Small on_click=search>
                        "Search"
                    </Button>
                </div>
            </div>
            {move || {
                if projects.with(Vec::is_empty) {
                    view! { <div class="list-empty">{EMPTY_LIST}</div> }.into_view()
                } else {
                    view! {
                        <ul class="project-list">
                            <For
                                each=move || projects.get()
                                key=|p| (p.id, p.title.clone(), p.description.clone())
                                children=|project| view! { <ProjectRow project=project/> }
                            />
                        </ul>
                    }
                    .into_view()
                }
            }}
        </Card>
    }
}

/// One list row; shows the draft inputs while this project is being edited
#[component]
fn ProjectRow(project: Project) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let state = ctx.state;
    let id = project.id;
    let editing = create_memo(move |_| state.with(|s| s.is_editing(id)));

    let draft_title = Signal::derive(move || {
        state.with(|s| s.editing.as_ref().map(|d| d.title.clone()).unwrap_or_default())
    });
    let draft_description = Signal::derive(move || {
        state.with(|s| {
            s.editing
                .as_ref()
                .map(|d| d.description.clone())
                .unwrap_or_default()
        })
    });
    let on_title = {
        let wb = ctx.workbench();
        move |value: String| wb.set_edit_title(value)
    };
    let on_description = {
        let wb = ctx.workbench();
        move |value: String| wb.set_edit_description(value)
    };

    let start_edit = {
        let wb = ctx.workbench();
        let project = project.clone();
        move |_: web_sys::MouseEvent| wb.start_edit(&project)
    };
    let delete = {
        let ctx = ctx.clone();
        move |_: web_sys::MouseEvent| ctx.spawn(move |wb| async move { wb.delete(id).await })
    };
    let save = {
        let ctx = ctx.clone();
        move |_: web_sys::MouseEvent| ctx.spawn(|wb| async move { wb.save_edit().await })
    };
    let cancel = {
        let wb = ctx.workbench();
        move |_: web_sys::MouseEvent| wb.cancel_edit()
    };

    let title = project.title.clone();
    let description = match project.description_or_empty() {
        "" => "No description".to_string(),
        text => text.to_string(),
    };

    view! {
        <li class="project-row">
            {move || {
                if editing.get() {
                    let (on_title, on_description) = (on_title.clone(), on_description.clone());
                    view! {
                        <div class="row-edit">
                            <TextInput value=draft_title on_input=on_title/>
                            <TextInput value=draft_description on_input=on_description/>
                        </div>
                    }
                    .into_view()
                } else {
                    view! {
                        <div class="row-info">
                            <div class="row-title">{title.clone()}</div>
                            <div class="row-description">{description.clone()}</div>
                            <div class="row-id">"id: " {id}</div>
                        </div>
                    }
                    .into_view()
                }
            }}
            <div class="row-actions">
                {move || {
                    if editing.get() {
                        let (save, cancel) = (save.clone(), cancel.clone());
                        view! {
                            <Button size=ButtonSize::Small on_click=save>"Save"</Button>
                            <Button size=ButtonSize::Small kind=ButtonKind::Ghost on_click=cancel>
                                "Cancel"
                            </Button>
                        }
                        .into_view()
                    } else {
                        let (start_edit, delete) = (start_edit.clone(), delete.clone());
                        view! {
                            <Button size=ButtonSize::Small kind=ButtonKind::Ghost on_click=start_edit>
                                "Edit"
                            </Button>
                            <Button size=ButtonSize::Small kind=ButtonKind::Danger on_click=delete>
                                "Delete"
                            </Button>
                        }
                        .into_view()
                    }
                }}
            </div>
        </li>
    }
}

/// Last outcome message, hidden while empty
#[component]
pub fn StatusLine(#[prop(optional)] error: bool) -> impl IntoView {
    let state = expect_context::<AppContext>().state;

    move || {
        let status = state.with(|s| s.status.clone());
        (!status.is_empty()).then(|| {
            view! { <div class="status" class:status-error=error>{status}</div> }
        })
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    view! { <footer class="footer">"DevLog"</footer> }
}
