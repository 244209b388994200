//! 可取消的案件提取
//!
//! 每次提交文件都会分配一个递增的请求票据（ticket）。只有票据仍是"当前"
//! 的提取结果才会被采纳；新的提交会中止上一次仍在进行的提取（后写者胜），
//! `cancel()` 中止并丢弃进行中的提取（例如离开当前页面）。

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info};

use crate::error::ExtractionError;
use crate::models::case_record::CaseRecord;
use crate::models::file_handle::FileHandle;
use crate::services::extractor::CaseExtractor;

/// 提取请求票据
pub type Ticket = u64;

#[derive(Default)]
struct TrackerState {
    last_issued: Ticket,
    current: Option<Ticket>,
    in_flight: Option<AbortHandle>,
    record: Option<CaseRecord>,
}

fn lock(state: &Mutex<TrackerState>) -> MutexGuard<'_, TrackerState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// 提取请求跟踪器
pub struct ExtractionTracker {
    extractor: Arc<dyn CaseExtractor>,
    state: Arc<Mutex<TrackerState>>,
}

impl ExtractionTracker {
    pub fn new(extractor: Arc<dyn CaseExtractor>) -> Self {
        Self {
            extractor,
            state: Arc::new(Mutex::new(TrackerState::default())),
        }
    }

    /// 提交文件进行提取
    ///
    /// 上一次未完成的提取会被中止，已采纳的案件数据会被清空
    pub fn submit(&self, file: FileHandle) -> PendingExtraction {
        let mut state = lock(&self.state);
        state.last_issued += 1;
        let ticket = state.last_issued;

        debug!("提交提取请求 #{}: {}", ticket, file.name());

        let extractor = Arc::clone(&self.extractor);
        let handle = tokio::spawn(async move { extractor.extract(&file).await });

        if let Some(previous) = state.in_flight.replace(handle.abort_handle()) {
            previous.abort();
        }
        if let Some(previous) = state.current.replace(ticket) {
            debug!("提取请求 #{} 已被 #{} 取代", previous, ticket);
        }
        state.record = None;

        PendingExtraction {
            ticket,
            handle,
            state: Arc::clone(&self.state),
        }
    }

    /// 取消进行中的提取并丢弃已采纳的数据
    ///
    /// 返回被取消的票据
    pub fn cancel(&self) -> Option<Ticket> {
        let mut state = lock(&self.state);
        if let Some(in_flight) = state.in_flight.take() {
            in_flight.abort();
        }
        state.record = None;
        let cancelled = state.current.take();
        if let Some(ticket) = cancelled {
            info!("已取消提取请求 #{}", ticket);
        }
        cancelled
    }

    pub fn current_ticket(&self) -> Option<Ticket> {
        lock(&self.state).current
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        lock(&self.state).current == Some(ticket)
    }

    /// 最近一次被采纳的案件数据
    pub fn current_record(&self) -> Option<CaseRecord> {
        lock(&self.state).record.clone()
    }
}

impl Drop for ExtractionTracker {
    fn drop(&mut self) {
        if let Some(in_flight) = lock(&self.state).in_flight.take() {
            in_flight.abort();
        }
    }
}

/// 一次进行中的提取
pub struct PendingExtraction {
    ticket: Ticket,
    handle: JoinHandle<Result<CaseRecord, ExtractionError>>,
    state: Arc<Mutex<TrackerState>>,
}

impl PendingExtraction {
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    /// 等待提取完成
    ///
    /// 票据已过期时结果被丢弃，返回 `Superseded` 或 `Cancelled`；
    /// 票据仍是当前时，成功的结果会被采纳到跟踪器中
    pub async fn wait(self) -> Result<CaseRecord, ExtractionError> {
        let outcome = self.handle.await;

        let mut state = lock(&self.state);
        if state.current != Some(self.ticket) {
            return Err(match state.current {
                Some(current) => ExtractionError::Superseded {
                    ticket: self.ticket,
                    current,
                },
                None => ExtractionError::Cancelled {
                    ticket: self.ticket,
                },
            });
        }

        state.in_flight = None;
        match outcome {
            Ok(Ok(record)) => {
                state.record = Some(record.clone());
                Ok(record)
            }
            Ok(Err(e)) => Err(e),
            Err(e) if e.is_cancelled() => Err(ExtractionError::Cancelled {
                ticket: self.ticket,
            }),
            Err(e) => Err(ExtractionError::TaskFailed(e.to_string())),
        }
    }
}
