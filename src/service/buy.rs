use std::pin::pin;

use tokio::sync::mpsc;
use tokio_stream::{Stream, StreamExt};
use tonic::Status;
use tracing::{debug, info};

use super::CellphoneServer;
use crate::error::ServiceError;
use crate::pb::{BuyCellphoneRequest, BuyCellphoneResponse};
use crate::validation::CallContext;

impl CellphoneServer {
    /// Record each inbound purchase and answer it with the cellphone's
    /// current average price, in arrival order, until the client half-closes.
    ///
    /// The ledger is shared by every call, so averages reflect purchases
    /// from concurrent calls too. Returns the number of purchases handled.
    pub async fn buy<S>(
        &self,
        ctx: &CallContext,
        inbound: S,
        out: &mpsc::Sender<Result<BuyCellphoneResponse, Status>>,
    ) -> Result<usize, ServiceError>
    where
        S: Stream<Item = Result<BuyCellphoneRequest, Status>> + Send,
    {
        let mut inbound = pin!(inbound);
        let mut handled = 0;

        loop {
            let request = match ctx.run(inbound.next()).await? {
                Some(Ok(request)) => request,
                Some(Err(status)) => return Err(ServiceError::Stream(status)),
                None => {
                    debug!(handled, "buy stream closed by client");
                    return Ok(handled);
                }
            };

            let response = self.purchase(&request)?;
            ctx.run(out.send(Ok(response)))
                .await?
                .map_err(|_| ServiceError::Canceled)?;
            handled += 1;
        }
    }

    /// Validate one purchase, record it, and report the new average.
    /// Nothing reaches the ledger unless the cellphone exists.
    pub fn purchase(
        &self,
        request: &BuyCellphoneRequest,
    ) -> Result<BuyCellphoneResponse, ServiceError> {
        self.ensure_known(&request.id)?;

        let aggregate = self.orders.record_purchase(&request.id, request.price)?;
        info!(
            id = %request.id,
            price = request.price,
            count = aggregate.count,
            "purchase recorded"
        );

        Ok(BuyCellphoneResponse {
            id: request.id.clone(),
            avg: aggregate.average(),
        })
    }
}
