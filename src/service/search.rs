use tokio::sync::mpsc;
use tonic::Status;
use tracing::debug;

use super::CellphoneServer;
use crate::error::ServiceError;
use crate::pb::{Cellphone, FilterCondition};
use crate::validation::CallContext;

impl CellphoneServer {
    /// Send every cellphone matching `condition` to `out`, one message each.
    ///
    /// Matches come from one store snapshot taken up front. Liveness is
    /// checked before each send; messages already sent stay sent. Returns
    /// the number of messages sent.
    pub async fn search(
        &self,
        ctx: &CallContext,
        condition: &FilterCondition,
        out: &mpsc::Sender<Result<Cellphone, Status>>,
    ) -> Result<usize, ServiceError> {
        ctx.check()?;
        let cellphones = self.store.search(condition);
        debug!(matches = cellphones.len(), "search snapshot taken");

        let mut sent = 0;
        for cellphone in cellphones {
            ctx.run(out.send(Ok(cellphone)))
                .await?
                .map_err(|_| ServiceError::Canceled)?;
            sent += 1;
        }
        Ok(sent)
    }
}
