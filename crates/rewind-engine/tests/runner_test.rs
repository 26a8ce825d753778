use async_trait::async_trait;
use rewind_common::selector::ElementSelector;
use rewind_common::workflow::{
    BrowserStep, Locator, ScrollDirection, StepAction, Viewport, Workflow,
};
use rewind_engine::driver::{Driver, DriverError, ElementHandle};
use rewind_engine::{ExecutionError, Job, Runner, RunnerConfig};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct FakeState {
    calls: Vec<String>,
    closed: bool,
    /// Live elements the driver reports, with their current snapshots.
    elements: Vec<(ElementHandle, ElementSelector)>,
    /// Candidate queries that come back empty before the page "settles".
    empty_scans_remaining: u32,
    /// Clicks that fail as not-interactable before succeeding.
    flaky_clicks_remaining: u32,
}

#[derive(Clone, Default)]
struct FakeDriver(Arc<Mutex<FakeState>>);

impl FakeDriver {
    fn with_elements(elements: Vec<(u64, ElementSelector)>) -> Self {
        let driver = FakeDriver::default();
        driver.0.lock().unwrap().elements = elements
            .into_iter()
            .map(|(id, selector)| (ElementHandle(id), selector))
            .collect();
        driver
    }

    fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().calls.clone()
    }

    fn closed(&self) -> bool {
        self.0.lock().unwrap().closed
    }
}

#[async_trait]
impl Driver for FakeDriver {
    async fn launch(&mut self, url: &str, viewport: Viewport) -> Result<(), DriverError> {
        let mut state = self.0.lock().unwrap();
        state
            .calls
            .push(format!("launch {} {}x{}", url, viewport.width, viewport.height));
        Ok(())
    }

    async fn close(&mut self) -> Result<(), DriverError> {
        let mut state = self.0.lock().unwrap();
        state.closed = true;
        state.calls.push("close".into());
        Ok(())
    }

    async fn find_candidates(
        &mut self,
        _page_id: u32,
        _base: &ElementSelector,
    ) -> Result<Vec<ElementHandle>, DriverError> {
        let mut state = self.0.lock().unwrap();
        if state.empty_scans_remaining > 0 {
            state.empty_scans_remaining -= 1;
            return Ok(vec![]);
        }
        Ok(state.elements.iter().map(|(handle, _)| *handle).collect())
    }

    async fn read_selector(
        &mut self,
        _page_id: u32,
        element: ElementHandle,
    ) -> Result<ElementSelector, DriverError> {
        let state = self.0.lock().unwrap();
        state
            .elements
            .iter()
            .find(|(handle, _)| *handle == element)
            .map(|(_, selector)| selector.clone())
            .ok_or(DriverError::StaleHandle(element))
    }

    async fn click(&mut self, _page_id: u32, element: ElementHandle) -> Result<(), DriverError> {
        let mut state = self.0.lock().unwrap();
        if state.flaky_clicks_remaining > 0 {
            state.flaky_clicks_remaining -= 1;
            return Err(DriverError::NotInteractable("covered by overlay".into()));
        }
        state.calls.push(format!("click {}", element.0));
        Ok(())
    }

    async fn input(
        &mut self,
        _page_id: u32,
        element: ElementHandle,
        value: &str,
    ) -> Result<(), DriverError> {
        let mut state = self.0.lock().unwrap();
        state.calls.push(format!("input {} {:?}", element.0, value));
        Ok(())
    }

    async fn scroll(&mut self, _page_id: u32, to: i64) -> Result<(), DriverError> {
        let mut state = self.0.lock().unwrap();
        state.calls.push(format!("scroll {}", to));
        Ok(())
    }
}

fn selector_with_id(id: &str) -> ElementSelector {
    ElementSelector {
        id: Some(id.into()),
        tag_name: Some("input".into()),
        ..Default::default()
    }
}

fn element_step(index: usize, action: StepAction, id: &str, value: Option<&str>) -> BrowserStep {
    BrowserStep {
        index,
        action,
        page_id: 0,
        locator: Locator::Element {
            selector: selector_with_id(id),
        },
        value: value.map(String::from),
        scroll_direction: None,
        scroll_to: None,
    }
}

fn scroll_step(index: usize, to: i64) -> BrowserStep {
    BrowserStep {
        index,
        action: StepAction::Scroll,
        page_id: 0,
        locator: Locator::Page,
        value: None,
        scroll_direction: Some(ScrollDirection::Down),
        scroll_to: Some(to),
    }
}

fn login_workflow() -> Workflow {
    Workflow {
        name: "login".into(),
        url: "https://recorded.example/login".into(),
        steps: vec![
            scroll_step(0, 100),
            element_step(1, StepAction::Input, "username", Some("spirit")),
            element_step(2, StepAction::Click, "submit", None),
        ],
    }
}

fn login_driver() -> FakeDriver {
    FakeDriver::with_elements(vec![
        (1, selector_with_id("username")),
        (2, selector_with_id("submit")),
    ])
}

fn quick_config() -> RunnerConfig {
    RunnerConfig {
        retry_delay_ms: 1,
        ..Default::default()
    }
}

fn job(env: &HashMap<String, String>) -> Job {
    Job::new(login_workflow(), Viewport::default(), env).unwrap()
}

#[tokio::test]
async fn replays_steps_in_index_order() {
    let driver = login_driver();

    Runner::execute(job(&HashMap::new()), driver.clone(), quick_config())
        .await
        .unwrap();

    assert_eq!(
        driver.calls(),
        vec![
            "launch https://recorded.example/login 1366x768",
            "scroll 100",
            "input 1 \"spirit\"",
            "click 2",
            "close",
        ]
    );
}

#[tokio::test]
async fn env_override_replaces_the_recorded_value() {
    let driver = login_driver();
    let mut env = HashMap::new();
    env.insert("QAW_LOGIN_1".to_string(), "override".to_string());

    Runner::execute(job(&env), driver.clone(), quick_config())
        .await
        .unwrap();

    assert!(driver.calls().contains(&"input 1 \"override\"".to_string()));
}

#[tokio::test]
async fn empty_string_override_clears_the_field() {
    let driver = login_driver();
    let mut env = HashMap::new();
    env.insert("QAW_LOGIN_1".to_string(), String::new());

    Runner::execute(job(&env), driver.clone(), quick_config())
        .await
        .unwrap();

    assert!(driver.calls().contains(&"input 1 \"\"".to_string()));
}

#[tokio::test]
async fn url_override_wins_over_the_recorded_url() {
    let driver = login_driver();
    let mut env = HashMap::new();
    env.insert("QAW_URL".to_string(), "https://staging.example/".to_string());

    Runner::execute(job(&env), driver.clone(), quick_config())
        .await
        .unwrap();

    assert_eq!(
        driver.calls()[0],
        "launch https://staging.example/ 1366x768"
    );
}

#[tokio::test]
async fn relocates_an_element_after_dom_drift() {
    // The live submit element gained a class since recording; id, tag and
    // the recorded class still match, so it clears the default floor while
    // the cancel button does not.
    let drifted = ElementSelector {
        id: Some("submit".into()),
        tag_name: Some("button".into()),
        class_list: Some(vec!["btn".into(), "btn-lg".into()]),
        ..Default::default()
    };
    let driver = FakeDriver::with_elements(vec![
        (7, ElementSelector {
            id: Some("cancel".into()),
            tag_name: Some("button".into()),
            ..Default::default()
        }),
        (8, drifted),
    ]);

    let recorded = ElementSelector {
        id: Some("submit".into()),
        tag_name: Some("button".into()),
        class_list: Some(vec!["btn".into()]),
        ..Default::default()
    };
    let workflow = Workflow {
        name: "drift".into(),
        url: "https://recorded.example/".into(),
        steps: vec![BrowserStep {
            index: 0,
            action: StepAction::Click,
            page_id: 0,
            locator: Locator::Element { selector: recorded },
            value: None,
            scroll_direction: None,
            scroll_to: None,
        }],
    };
    let job = Job::new(workflow, Viewport::default(), &HashMap::new()).unwrap();

    Runner::execute(job, driver.clone(), quick_config())
        .await
        .unwrap();

    assert!(driver.calls().contains(&"click 8".to_string()));
}

#[tokio::test]
async fn retries_until_the_page_settles() {
    let driver = login_driver();
    driver.0.lock().unwrap().empty_scans_remaining = 1;
    driver.0.lock().unwrap().flaky_clicks_remaining = 1;

    let config = RunnerConfig {
        max_retries: 4,
        retry_delay_ms: 1,
        ..Default::default()
    };

    Runner::execute(job(&HashMap::new()), driver.clone(), config)
        .await
        .unwrap();

    assert!(driver.calls().contains(&"click 2".to_string()));
}

#[tokio::test]
async fn exhausted_retries_abort_the_job_but_release_the_session() {
    let driver = login_driver();
    // Candidates never appear: every locate attempt fails.
    driver.0.lock().unwrap().empty_scans_remaining = u32::MAX;

    let err = Runner::execute(job(&HashMap::new()), driver.clone(), quick_config())
        .await
        .unwrap_err();

    assert!(matches!(err, ExecutionError::Locate { index: 1, .. }));
    assert!(driver.closed());
    // The click step never ran: the job aborted at the input step.
    assert!(!driver.calls().iter().any(|c| c.starts_with("click")));
}

#[tokio::test]
async fn element_step_with_a_page_locator_is_malformed() {
    let driver = login_driver();
    let workflow = Workflow {
        name: "broken".into(),
        url: "https://recorded.example/".into(),
        steps: vec![BrowserStep {
            index: 0,
            action: StepAction::Click,
            page_id: 0,
            locator: Locator::Page,
            value: None,
            scroll_direction: None,
            scroll_to: None,
        }],
    };
    let job = Job::new(workflow, Viewport::default(), &HashMap::new()).unwrap();

    let err = Runner::execute(job, driver.clone(), quick_config())
        .await
        .unwrap_err();

    assert!(matches!(err, ExecutionError::MalformedStep { index: 0, .. }));
    assert!(driver.closed());
}

#[tokio::test]
async fn malformed_override_is_rejected_before_anything_executes() {
    let mut env = HashMap::new();
    // Step 2 is a click; it takes no value.
    env.insert("QAW_LOGIN_2".to_string(), "boom".to_string());

    assert!(Job::new(login_workflow(), Viewport::default(), &env).is_err());
}
